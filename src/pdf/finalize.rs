//! Second pass over a completed document: stamp the footer band on every page
//! (page count is only known now), then serialize with `pdf-writer`.

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::assets::{EmbeddedImage, ImageData};
use crate::config::CompanyProfile;
use crate::error::Error;
use crate::fonts::{FontFace, register_fonts, to_winansi_bytes};

use super::cursor::PageGeometry;
use super::page::{DrawOp, Page, RenderedDocument, Rgb, Stroke, TextRun};
use super::{BORDER, MUTED, TEXT};

/// Offsets of the footer elements below the top of the reserved band.
const RULE_OFFSET: f32 = 10.0;
const CONTACT_OFFSET: f32 = 18.0;
const NOTICE_OFFSET: f32 = 33.0;

pub const COMPUTER_GENERATED_NOTICE: &str = "This is a computer generated quotation";

/// Circle approximation constant for cubic Bézier corners.
const KAPPA: f32 = 0.552_284_8;

pub fn contact_line(company: &CompanyProfile) -> String {
    [
        ("GST No", company.gst_number.as_str()),
        ("Phone", company.phone.as_str()),
        ("Email", company.email.as_str()),
    ]
    .iter()
    .filter(|(_, v)| !v.trim().is_empty())
    .map(|(k, v)| format!("{k}: {}", v.trim()))
    .collect::<Vec<_>>()
    .join(" | ")
}

fn run_at(text: String, x: f32, y: f32, font_size: f32, color: Rgb) -> DrawOp {
    DrawOp::Text(TextRun {
        text,
        x,
        y,
        font: FontFace::Regular,
        font_size,
        color,
    })
}

/// Overlay the footer band on every page: separator rule, centered contact
/// line, centered notice, and right-aligned `Page i of N`. This is the only
/// writer of the reserved footer region.
pub fn stamp_footers(doc: &mut RenderedDocument, company: &CompanyProfile, geometry: &PageGeometry) {
    let total = doc.pages.len();
    let contact = contact_line(company);
    let band_top = geometry.usable_bottom();

    for (i, page) in doc.pages.iter_mut().enumerate() {
        let center = |text: &str, size: f32| (page.width - FontFace::Regular.text_width(text, size)) / 2.0;

        let rule_y = band_top + RULE_OFFSET;
        let contact_x = center(&contact, 8.0);
        let notice_x = center(COMPUTER_GENERATED_NOTICE, 7.5);
        let label = format!("Page {} of {}", i + 1, total);
        let label_x = geometry.right_edge() - FontFace::Regular.text_width(&label, 7.5);

        page.ops.push(DrawOp::Line {
            x1: geometry.margin_left,
            y1: rule_y,
            x2: geometry.right_edge(),
            y2: rule_y,
            stroke: Stroke { color: BORDER, width: 0.5 },
        });
        page.ops.push(run_at(contact.clone(), contact_x, band_top + CONTACT_OFFSET, 8.0, TEXT));
        page.ops.push(run_at(
            COMPUTER_GENERATED_NOTICE.to_string(),
            notice_x,
            band_top + NOTICE_OFFSET,
            7.5,
            MUTED,
        ));
        page.ops.push(run_at(label, label_x, band_top + NOTICE_OFFSET, 7.5, MUTED));
    }
    log::debug!("stamp_footers: {} page(s)", total);
}

/// Stamp footers and serialize. Consumes the document, so footers are stamped
/// exactly once.
pub fn finalize(
    mut doc: RenderedDocument,
    company: &CompanyProfile,
    geometry: &PageGeometry,
) -> Result<Vec<u8>, Error> {
    if doc.pages.is_empty() {
        return Err(Error::Pdf("document has no pages".to_string()));
    }
    stamp_footers(&mut doc, company, geometry);
    Ok(write_pdf(&doc))
}

fn rgb(c: Rgb) -> (f32, f32, f32) {
    (c[0] as f32 / 255.0, c[1] as f32 / 255.0, c[2] as f32 / 255.0)
}

fn embed_image(pdf: &mut Pdf, alloc: &mut impl FnMut() -> Ref, img: &EmbeddedImage) -> Ref {
    let xobj_ref = alloc();
    match &img.data {
        ImageData::Jpeg(bytes) => {
            let mut xobj = pdf.image_xobject(xobj_ref, bytes);
            xobj.filter(Filter::DctDecode);
            xobj.width(img.pixel_width as i32);
            xobj.height(img.pixel_height as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
        }
        ImageData::Raw { rgb, alpha } => {
            let smask_ref = alpha.as_ref().map(|alpha| {
                let compressed = miniz_oxide::deflate::compress_to_vec_zlib(alpha, 6);
                let mask_ref = alloc();
                let mut mask = pdf.image_xobject(mask_ref, &compressed);
                mask.filter(Filter::FlateDecode);
                mask.width(img.pixel_width as i32);
                mask.height(img.pixel_height as i32);
                mask.color_space().device_gray();
                mask.bits_per_component(8);
                mask_ref
            });

            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(rgb, 6);
            let mut xobj = pdf.image_xobject(xobj_ref, &compressed);
            xobj.filter(Filter::FlateDecode);
            xobj.width(img.pixel_width as i32);
            xobj.height(img.pixel_height as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
            if let Some(mask_ref) = smask_ref {
                xobj.s_mask(mask_ref);
            }
        }
    }
    xobj_ref
}

/// Rounded rectangle path in PDF (bottom-up) coordinates.
fn rounded_rect(content: &mut Content, x: f32, y: f32, w: f32, h: f32, r: f32) {
    let r = r.min(w / 2.0).min(h / 2.0);
    let k = KAPPA * r;
    content.move_to(x + r, y);
    content.line_to(x + w - r, y);
    content.cubic_to(x + w - r + k, y, x + w, y + r - k, x + w, y + r);
    content.line_to(x + w, y + h - r);
    content.cubic_to(x + w, y + h - r + k, x + w - r + k, y + h, x + w - r, y + h);
    content.line_to(x + r, y + h);
    content.cubic_to(x + r - k, y + h, x, y + h - r + k, x, y + h - r);
    content.line_to(x, y + r);
    content.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    content.close_path();
}

/// Translate one page's top-down draw ops into a content stream.
fn page_content(page: &Page, image_names: &[String]) -> Content {
    let mut content = Content::new();
    let ph = page.height;

    for op in &page.ops {
        match op {
            DrawOp::Rect { x, y, width, height, fill, stroke } => {
                content.save_state();
                if let Some(c) = fill {
                    let (r, g, b) = rgb(*c);
                    content.set_fill_rgb(r, g, b);
                }
                if let Some(s) = stroke {
                    let (r, g, b) = rgb(s.color);
                    content.set_stroke_rgb(r, g, b);
                    content.set_line_width(s.width);
                }
                content.rect(*x, ph - y - height, *width, *height);
                match (fill.is_some(), stroke.is_some()) {
                    (true, true) => content.fill_nonzero_and_stroke(),
                    (true, false) => content.fill_nonzero(),
                    (false, true) => content.stroke(),
                    (false, false) => content.end_path(),
                };
                content.restore_state();
            }
            DrawOp::Line { x1, y1, x2, y2, stroke } => {
                let (r, g, b) = rgb(stroke.color);
                content.save_state();
                content.set_stroke_rgb(r, g, b);
                content.set_line_width(stroke.width);
                content.move_to(*x1, ph - y1);
                content.line_to(*x2, ph - y2);
                content.stroke();
                content.restore_state();
            }
            DrawOp::Text(run) => {
                let bytes = to_winansi_bytes(&run.text);
                if bytes.is_empty() {
                    continue;
                }
                let (r, g, b) = rgb(run.color);
                let baseline = ph - (run.y + run.font.ascent(run.font_size));
                content.begin_text();
                content.set_fill_rgb(r, g, b);
                content.set_font(Name(run.font.pdf_name().as_bytes()), run.font_size);
                content.next_line(run.x, baseline);
                content.show(Str(&bytes));
                content.end_text();
            }
            DrawOp::Image { image, x, y, width, height, clip_radius } => {
                let Some(name) = image_names.get(*image) else {
                    log::warn!("draw op references missing image #{image}, skipped");
                    continue;
                };
                let bottom = ph - y - height;
                content.save_state();
                if let Some(radius) = clip_radius {
                    rounded_rect(&mut content, *x, bottom, *width, *height, *radius);
                    content.clip_nonzero();
                    content.end_path();
                }
                content.transform([*width, 0.0, 0.0, *height, *x, bottom]);
                content.x_object(Name(name.as_bytes()));
                content.restore_state();
            }
        }
    }
    content
}

fn write_pdf(doc: &RenderedDocument) -> Vec<u8> {
    let t0 = std::time::Instant::now();
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();

    let fonts = register_fonts(&mut pdf, &mut alloc);

    let image_refs: Vec<(String, Ref)> = doc
        .images
        .iter()
        .enumerate()
        .map(|(i, img)| (format!("Im{}", i + 1), embed_image(&mut pdf, &mut alloc, img)))
        .collect();
    let image_names: Vec<String> = image_refs.iter().map(|(n, _)| n.clone()).collect();
    let t_resources = t0.elapsed();

    let n = doc.pages.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (i, page) in doc.pages.iter().enumerate() {
        let raw = page_content(page, &image_names).finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    for (i, page) in doc.pages.iter().enumerate() {
        let mut p = pdf.page(page_ids[i]);
        p.media_box(Rect::new(0.0, 0.0, page.width, page.height))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = p.resources();
        {
            let mut font_dict = resources.fonts();
            for (face, font_ref) in &fonts {
                font_dict.pair(Name(face.pdf_name().as_bytes()), *font_ref);
            }
        }
        if !image_refs.is_empty() {
            let mut xobjects = resources.x_objects();
            for (name, xobj_ref) in &image_refs {
                xobjects.pair(Name(name.as_bytes()), *xobj_ref);
            }
        }
    }

    let producer = format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    pdf.document_info(info_id)
        .title(TextStr(&doc.info.title))
        .author(TextStr(&doc.info.author))
        .creator(TextStr(&producer))
        .producer(TextStr(&producer));

    let t_pages = t0.elapsed();
    log::info!(
        "Finalize phases: resources={:.1}ms, pages={:.1}ms ({} page(s), {} image(s))",
        t_resources.as_secs_f64() * 1000.0,
        (t_pages - t_resources).as_secs_f64() * 1000.0,
        n,
        doc.images.len(),
    );

    pdf.finish()
}
