//! Serialising laid-out pages with `lopdf`.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat, dictionary};

use crate::PdfError;
use crate::encoding::to_win_ansi;
use crate::layout::{Draw, Page, PageGeometry};
use crate::style::{Color, Font};

/// Bezier control point distance for a quarter circle of radius 1.
const KAPPA: f32 = 0.552_284_8;

const PRODUCER: &str = concat!("mdpress ", env!("CARGO_PKG_VERSION"));

/// Write pages into a complete PDF document.
pub(crate) fn write_document(
    pages: &[Page],
    geometry: &PageGeometry,
    title: Option<&str>,
) -> Result<Vec<u8>, PdfError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in Font::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! { "Font" => fonts });

    let mut kids = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), geometry.width.into(), geometry.height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(Object::from(page_id));
    }

    let count = i64::try_from(kids.len()).unwrap_or(i64::MAX);
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    let mut info = dictionary! { "Producer" => Object::string_literal(PRODUCER) };
    if let Some(title) = title {
        info.set(
            "Title",
            Object::String(to_win_ansi(title), StringFormat::Literal),
        );
    }
    let info_id = doc.add_object(info);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

fn color_operands(color: Color) -> Vec<Object> {
    color.components().into_iter().map(Object::from).collect()
}

/// Content stream operations for one page.
fn page_content(page: &Page) -> Content {
    let mut operations = Vec::new();
    for draw in &page.items {
        draw_operations(draw, &mut operations);
    }
    Content { operations }
}

fn draw_operations(draw: &Draw, ops: &mut Vec<Operation>) {
    match draw {
        Draw::Text {
            x,
            y,
            font,
            size,
            color,
            text,
        } => {
            ops.push(Operation::new("BT", vec![]));
            ops.push(Operation::new(
                "Tf",
                vec![font.resource_name().into(), (*size).into()],
            ));
            ops.push(Operation::new("rg", color_operands(*color)));
            ops.push(Operation::new("Td", vec![(*x).into(), (*y).into()]));
            ops.push(Operation::new(
                "Tj",
                vec![Object::String(text.clone(), StringFormat::Literal)],
            ));
            ops.push(Operation::new("ET", vec![]));
        }
        Draw::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        } => {
            let rect = || {
                Operation::new(
                    "re",
                    vec![(*x).into(), (*y).into(), (*width).into(), (*height).into()],
                )
            };
            if let Some(fill) = fill {
                ops.push(Operation::new("rg", color_operands(*fill)));
                ops.push(rect());
                ops.push(Operation::new("f", vec![]));
            }
            if let Some((line_width, color)) = stroke {
                ops.push(Operation::new("w", vec![(*line_width).into()]));
                ops.push(Operation::new("RG", color_operands(*color)));
                ops.push(rect());
                ops.push(Operation::new("S", vec![]));
            }
        }
        Draw::Line {
            from,
            to,
            width,
            color,
        } => {
            ops.push(Operation::new("w", vec![(*width).into()]));
            ops.push(Operation::new("RG", color_operands(*color)));
            ops.push(Operation::new("m", vec![from.0.into(), from.1.into()]));
            ops.push(Operation::new("l", vec![to.0.into(), to.1.into()]));
            ops.push(Operation::new("S", vec![]));
        }
        Draw::Circle {
            cx,
            cy,
            radius,
            width,
            color,
        } => {
            ops.push(Operation::new("w", vec![(*width).into()]));
            ops.push(Operation::new("RG", color_operands(*color)));
            circle_path(*cx, *cy, *radius, ops);
            ops.push(Operation::new("S", vec![]));
        }
    }
}

/// Four cubic Bezier segments approximating a circle.
fn circle_path(cx: f32, cy: f32, r: f32, ops: &mut Vec<Operation>) {
    let k = r * KAPPA;
    let curve = |points: [f32; 6]| Operation::new("c", points.map(Object::from).to_vec());

    ops.push(Operation::new("m", vec![(cx + r).into(), cy.into()]));
    ops.push(curve([cx + r, cy + k, cx + k, cy + r, cx, cy + r]));
    ops.push(curve([cx - k, cy + r, cx - r, cy + k, cx - r, cy]));
    ops.push(curve([cx - r, cy - k, cx - k, cy - r, cx, cy - r]));
    ops.push(curve([cx + k, cy - r, cx + r, cy - k, cx + r, cy]));
}
