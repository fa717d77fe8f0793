//! Ticket rendering with `lopdf`.
//!
//! The layout is fixed: an 850x500 page, standard Times-Roman, black text
//! placed at absolute coordinates. Downstream printers rely on the exact
//! position and size of every line.

use crate::core::{TicketDocument, TicketRenderer};
use crate::utils::error::{Result, TicketError};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

pub const PAGE_WIDTH: i64 = 850;
pub const PAGE_HEIGHT: i64 = 500;
pub const FONT_NAME: &str = "Times-Roman";
pub const TITLE_SIZE: i64 = 30;
pub const BODY_SIZE: i64 = 20;
/// Distance between disclaimer lines.
pub const LINE_HEIGHT: i64 = 24;
pub const LEFT_MARGIN: i64 = 50;

pub const DISCLAIMER: [&str; 5] = [
    "Si segnala che il numero del ticket potrebbe non essere corretto.",
    "I dati più affidabili sono la data e l'orario. Questo servizio, fornito da volontari,",
    "non offre garanzie specifiche, ma è stato istituito per mantenere un minimo di ordine.",
    "Serve a gestire le richieste di informazioni da parte di coloro che non hanno un appuntamento.",
    "Si prega di attendere di ricevere i numeri dal personale incaricato.",
];

const FONT_RESOURCE: &str = "F1";

/// One block of text drawn at (x, y). Multi-line blocks advance downwards by
/// [`LINE_HEIGHT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub x: i64,
    pub y: i64,
    pub size: i64,
}

impl TextBlock {
    fn line(text: impl Into<String>, y: i64, size: i64) -> Self {
        Self {
            lines: vec![text.into()],
            x: LEFT_MARGIN,
            y,
            size,
        }
    }
}

pub fn ticket_layout(document: &TicketDocument) -> Vec<TextBlock> {
    vec![
        TextBlock::line("Ticket", 350, TITLE_SIZE),
        TextBlock::line(format!("Data: {}", document.date), 300, BODY_SIZE),
        TextBlock::line(format!("Ore : {}", document.time), 270, BODY_SIZE),
        TextBlock::line(
            format!("Numero del Ticket: {}", document.ticket_number),
            240,
            BODY_SIZE,
        ),
        TextBlock {
            lines: DISCLAIMER.iter().map(|line| line.to_string()).collect(),
            x: LEFT_MARGIN,
            y: 200,
            size: BODY_SIZE,
        },
    ]
}

/// WinAnsi 編碼；Latin-1 範圍外的字元以 `?` 取代
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

fn block_operations(block: &TextBlock) -> Vec<Operation> {
    let mut ops = vec![
        Operation::new("q", vec![]),
        Operation::new("BT", vec![]),
        Operation::new("rg", vec![0.into(), 0.into(), 0.into()]),
        Operation::new(
            "Tf",
            vec![Object::Name(FONT_RESOURCE.as_bytes().to_vec()), block.size.into()],
        ),
        Operation::new("TL", vec![LINE_HEIGHT.into()]),
        Operation::new(
            "Tm",
            vec![
                1.into(),
                0.into(),
                0.into(),
                1.into(),
                block.x.into(),
                block.y.into(),
            ],
        ),
    ];

    for (index, line) in block.lines.iter().enumerate() {
        if index > 0 {
            ops.push(Operation::new("T*", vec![]));
        }
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(win_ansi(line), StringFormat::Literal)],
        ));
    }

    ops.push(Operation::new("ET", vec![]));
    ops.push(Operation::new("Q", vec![]));
    ops
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTicketRenderer;

impl PdfTicketRenderer {
    pub fn new() -> Self {
        Self
    }

    fn build(&self, document: &TicketDocument) -> std::result::Result<Vec<u8>, lopdf::Error> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => FONT_NAME,
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                FONT_RESOURCE => font_id,
            },
        });

        let content: Content<Vec<Operation>> = Content {
            operations: ticket_layout(document)
                .iter()
                .flat_map(block_operations)
                .collect(),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

impl TicketRenderer for PdfTicketRenderer {
    fn render(&self, document: &TicketDocument) -> Result<Vec<u8>> {
        self.build(document)
            .map_err(|e| TicketError::render(e.to_string()))
    }
}
