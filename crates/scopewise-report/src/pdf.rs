//! Encodes a laid out document as PDF with lopdf.

use crate::document::Document;
use crate::error::ReportError;
use crate::layout::{Color, Element, Layout, PAGE_HEIGHT, PAGE_WIDTH};
use crate::text::{Face, to_win_ansi};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object, ObjectId, Stream, StringFormat, dictionary};

const REGULAR_FONT: &[u8] = b"F1";
const BOLD_FONT: &[u8] = b"F2";

fn encode_err(e: impl std::fmt::Display) -> ReportError {
    ReportError::Encode(e.to_string())
}

fn name(value: &[u8]) -> Object {
    Object::Name(value.to_vec())
}

fn literal(bytes: Vec<u8>) -> Object {
    Object::String(bytes, StringFormat::Literal)
}

fn fill_color(color: Color) -> Operation {
    Operation::new(
        "rg",
        vec![color.0.into(), color.1.into(), color.2.into()],
    )
}

fn element_operations(element: &Element, ops: &mut Vec<Operation>) {
    match element {
        Element::Text {
            x,
            y,
            size,
            face,
            color,
            text,
        } => {
            let font = match face {
                Face::Regular => REGULAR_FONT,
                Face::Bold => BOLD_FONT,
            };
            ops.push(Operation::new("BT", vec![]));
            ops.push(Operation::new("Tf", vec![name(font), (*size).into()]));
            ops.push(fill_color(*color));
            ops.push(Operation::new(
                "Td",
                vec![(*x).into(), (PAGE_HEIGHT - y).into()],
            ));
            ops.push(Operation::new("Tj", vec![literal(to_win_ansi(text))]));
            ops.push(Operation::new("ET", vec![]));
        }
        Element::Rect {
            x,
            y,
            width,
            height,
            color,
        } => {
            ops.push(fill_color(*color));
            ops.push(Operation::new(
                "re",
                vec![
                    (*x).into(),
                    (PAGE_HEIGHT - y - height).into(),
                    (*width).into(),
                    (*height).into(),
                ],
            ));
            ops.push(Operation::new("f", vec![]));
        }
    }
}

fn font(base: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Serialise the layout to PDF bytes.
pub fn encode(doc: &Document, layout: &Layout) -> Result<Vec<u8>, ReportError> {
    let mut pdf = lopdf::Document::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let regular_id = pdf.add_object(font("Helvetica"));
    let bold_id = pdf.add_object(font("Helvetica-Bold"));
    let resources_id = pdf.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let mut operations = Vec::new();
        for element in &page.elements {
            element_operations(element, &mut operations);
        }
        let content = Content { operations };
        let content_id = pdf.add_object(Stream::new(
            dictionary! {},
            content.encode().map_err(encode_err)?,
        ));
        let page_id: ObjectId = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(PAGE_WIDTH),
            Object::Real(PAGE_HEIGHT),
        ],
    };
    pdf.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);

    let info_id = pdf.add_object(dictionary! {
        "Title" => literal(to_win_ansi(&doc.title)),
        "Author" => literal(to_win_ansi(&doc.author)),
        "Subject" => literal(to_win_ansi(&doc.document_id)),
        "Producer" => literal(b"scopewise".to_vec()),
    });
    pdf.trailer.set("Info", info_id);

    pdf.compress();

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes).map_err(encode_err)?;
    Ok(bytes)
}
