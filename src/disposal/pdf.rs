//! Serializes the page model to PDF bytes.
//!
//! Uses the two standard Helvetica faces with WinAnsi encoding, so no font
//! files are embedded. Images are written as 8-bit Flate-compressed XObjects.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document as PdfDocument, Object, ObjectId, Stream, StringFormat};
use thiserror::Error;

use super::layout::{text_width, Align, Document, DrawOp, Rgb, TextStyle, PAGE_HEIGHT, PAGE_WIDTH};
use super::raster::{ColorSpace, RasterImage};

const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("failed to encode page content: {0}")]
    Content(String),
    #[error("failed to serialize PDF: {0}")]
    Serialize(String),
}

/// Document-level metadata written to the PDF Info dictionary.
#[derive(Debug, Clone, Default)]
pub struct PdfMetadata {
    pub title: String,
    pub subject: String,
    pub producer: String,
}

pub fn render_pdf(document: &Document, metadata: &PdfMetadata) -> Result<Vec<u8>, PdfError> {
    let mut pdf = PdfDocument::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let font_regular = pdf.add_object(standard_font("Helvetica"));
    let font_bold = pdf.add_object(standard_font("Helvetica-Bold"));

    let mut xobjects = Dictionary::new();
    for (index, image) in document.images.iter().enumerate() {
        let id = pdf.add_object(image_stream(image));
        xobjects.set(image_name(index), id);
    }

    let resources_id = pdf.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_REGULAR => font_regular,
            FONT_BOLD => font_bold,
        },
        "XObject" => xobjects,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(document.pages.len());
    for page in &document.pages {
        let operations: Vec<Operation> = page.ops.iter().flat_map(operations_for).collect();
        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| PdfError::Content(e.to_string()))?;
        let content_id = pdf.add_object(Stream::new(Dictionary::new(), encoded));

        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                PAGE_WIDTH.into(),
                PAGE_HEIGHT.into(),
            ],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = info_dictionary(&mut pdf, metadata);
    pdf.trailer.set("Root", catalog_id);
    pdf.trailer.set("Info", info_id);

    let mut out = Vec::new();
    pdf.save_to(&mut out)
        .map_err(|e| PdfError::Serialize(e.to_string()))?;
    Ok(out)
}

fn standard_font(base: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn info_dictionary(pdf: &mut PdfDocument, metadata: &PdfMetadata) -> ObjectId {
    pdf.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(&metadata.title), StringFormat::Literal),
        "Subject" => Object::String(encode_win_ansi(&metadata.subject), StringFormat::Literal),
        "Producer" => Object::String(encode_win_ansi(&metadata.producer), StringFormat::Literal),
    })
}

fn image_name(index: usize) -> String {
    format!("Im{index}")
}

fn image_stream(image: &RasterImage) -> Stream {
    let color_space = match image.color {
        ColorSpace::Gray => "DeviceGray",
        ColorSpace::Rgb => "DeviceRGB",
    };
    let mut stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => image.width as i64,
            "Height" => image.height as i64,
            "ColorSpace" => color_space,
            "BitsPerComponent" => 8,
        },
        image.pixels.clone(),
    );
    // Left uncompressed if deflate fails; the stream is still valid.
    let _ = stream.compress();
    stream
}

fn color_operands(color: Rgb) -> Vec<Object> {
    [color.0, color.1, color.2]
        .into_iter()
        .map(|c| Object::from(c as f32 / 255.0))
        .collect()
}

fn operations_for(op: &DrawOp) -> Vec<Operation> {
    match op {
        DrawOp::Text { x, y, text, style } => text_operations(*x, *y, text, style),
        DrawOp::Rect {
            x,
            y,
            w,
            h,
            fill,
            stroke,
        } => {
            let paint = match (fill, stroke) {
                (Some(_), Some(_)) => "B",
                (Some(_), None) => "f",
                (None, Some(_)) => "S",
                (None, None) => return Vec::new(),
            };
            let mut ops = vec![Operation::new("q", vec![])];
            if let Some(fill) = fill {
                ops.push(Operation::new("rg", color_operands(*fill)));
            }
            if let Some(stroke) = stroke {
                ops.push(Operation::new("RG", color_operands(*stroke)));
                ops.push(Operation::new("w", vec![0.5f32.into()]));
            }
            ops.push(Operation::new(
                "re",
                vec![(*x).into(), (PAGE_HEIGHT - y - h).into(), (*w).into(), (*h).into()],
            ));
            ops.push(Operation::new(paint, vec![]));
            ops.push(Operation::new("Q", vec![]));
            ops
        }
        DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            width,
            color,
        } => vec![
            Operation::new("q", vec![]),
            Operation::new("RG", color_operands(*color)),
            Operation::new("w", vec![(*width).into()]),
            Operation::new("m", vec![(*x1).into(), (PAGE_HEIGHT - y1).into()]),
            Operation::new("l", vec![(*x2).into(), (PAGE_HEIGHT - y2).into()]),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ],
        DrawOp::Image { x, y, w, h, image } => vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    (*w).into(),
                    Object::Integer(0),
                    Object::Integer(0),
                    (*h).into(),
                    (*x).into(),
                    (PAGE_HEIGHT - y - h).into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(image_name(*image).into_bytes())]),
            Operation::new("Q", vec![]),
        ],
    }
}

fn text_operations(x: f32, y: f32, text: &str, style: &TextStyle) -> Vec<Operation> {
    let width = text_width(text, style.size, style.bold);
    let start_x = match style.align {
        Align::Left => x,
        Align::Center => x - width / 2.0,
        Align::Right => x - width,
    };
    let font = if style.bold { FONT_BOLD } else { FONT_REGULAR };

    vec![
        Operation::new("BT", vec![]),
        Operation::new("rg", color_operands(style.color)),
        Operation::new("Tf", vec![Object::Name(font.as_bytes().to_vec()), style.size.into()]),
        Operation::new("Td", vec![start_x.into(), (PAGE_HEIGHT - y).into()]),
        Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        ),
        Operation::new("ET", vec![]),
    ]
}

/// Map text to WinAnsi bytes; characters outside the code page become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}
