use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use genpdf::elements::{Break, Image as PdfImage, Paragraph};
use genpdf::style::{Style, StyledString};
use genpdf::Document;
use image::imageops::FilterType;
use image::{load_from_memory, DynamicImage, GenericImageView};
use png::{BitDepth as PngBitDepth, ColorType as PngColorType, Encoder as PngEncoder};
use std::error::Error;
use std::path::PathBuf;
use tempfile::NamedTempFile;

use actix_web::{web, Responder};
use common::wire::{ReportPayload, RepairRequestRecord, UserRecord};

const PAGE_WIDTH_INCH: f64 = 8.5;
const MARGIN_MM: f64 = 10.0;
const IMAGE_DPI: f64 = 150.0;
// Mirror the detail page's thumbnail limits so the PDF photos keep roughly
// the on-screen proportions.
const PHOTO_MAX_CSS_PX: f64 = 260.0;

const UNRESOLVED: &str = "Não definido";

pub async fn process(payload: web::Json<ReportPayload>) -> impl Responder {
    match render_report(&payload) {
        Ok(bytes) => actix_web::HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header((
                "Content-Disposition",
                "inline; filename=\"relatorio_reparos.pdf\"",
            ))
            .body(bytes),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Erro ao gerar o relatório PDF: {}", e)),
    }
}

/// Load the font family (adjust path/name if needed).
fn load_font() -> Result<genpdf::fonts::FontFamily<genpdf::fonts::FontData>, Box<dyn Error>> {
    if let Ok(family) = genpdf::fonts::from_files("./fonts", "Arial", None) {
        return Ok(family);
    }
    genpdf::fonts::from_files("./fonts", "LiberationSans", None).map_err(Into::into)
}

fn configure_document() -> Result<Document, Box<dyn Error>> {
    let font_family = load_font()?;
    let mut doc = Document::new(font_family);
    doc.set_title("Relatório de Visitas Técnicas - SGR-Vias");
    doc.set_font_size(10);
    doc.set_line_spacing(1.0);

    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);
    Ok(doc)
}

/// "Label: value" line with the label in bold.
fn labeled(label: &str, value: &str) -> Paragraph {
    let mut p = Paragraph::new("");
    p.push(StyledString::new(format!("{}: ", label), Style::new().bold()));
    p.push(StyledString::new(value, Style::new()));
    p
}

/// Strips an optional `data:<mime>;base64,` prefix and decodes. Returns
/// `None` for values that are not embeddable (e.g. plain http URLs).
fn decode_photo(data: &str) -> Option<Vec<u8>> {
    let encoded = match data.split_once("base64,") {
        Some((_, rest)) => rest,
        None if data.starts_with("http") => return None,
        None => data,
    };
    BASE64.decode(encoded.trim()).ok()
}

/// Rescales a photo to fit the printable width, flattens any alpha channel
/// over white, writes a temporary PNG and embeds it at a fixed DPI. The
/// temp file must outlive rendering, so it is pushed onto `temp_files`.
fn embed_photo(
    doc: &mut Document,
    temp_files: &mut Vec<NamedTempFile>,
    bytes: &[u8],
) -> Result<(), Box<dyn Error>> {
    let margin_in = MARGIN_MM / 25.4_f64;
    let content_width_in = PAGE_WIDTH_INCH - 2.0 * margin_in;
    let content_target_px = content_width_in * IMAGE_DPI;

    // Convert CSS px -> image pixels at IMAGE_DPI assuming 96 CSS px per inch.
    let css_to_px = IMAGE_DPI / 96.0;
    let css_max_px = PHOTO_MAX_CSS_PX * css_to_px;

    let img = load_from_memory(bytes)?;
    let (orig_w, orig_h) = img.dimensions();
    let orig_w_f = orig_w as f64;
    let orig_h_f = orig_h as f64;

    let scale = (content_target_px / orig_w_f)
        .min(css_max_px / orig_w_f)
        .min(css_max_px / orig_h_f)
        .min(1.0);

    let resized: DynamicImage = if scale >= 1.0 {
        img
    } else {
        let new_w = (orig_w_f * scale).max(1.0).round() as u32;
        let new_h = (orig_h_f * scale).max(1.0).round() as u32;
        img.resize(new_w, new_h, FilterType::Lanczos3)
    };

    let rgba = resized.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mut background = image::RgbaImage::from_pixel(w, h, image::Rgba([255, 255, 255, 255]));
    image::imageops::overlay(&mut background, &rgba, 0, 0);
    let rgb_image = DynamicImage::ImageRgba8(background).to_rgb8();
    let raw = rgb_image.into_raw();

    let mut tmp = NamedTempFile::new()?;
    {
        let file = tmp.as_file_mut();
        let mut encoder = PngEncoder::new(file, w, h);
        encoder.set_color(PngColorType::Rgb);
        encoder.set_depth(PngBitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&raw)?;
    }

    let path: PathBuf = tmp.path().to_path_buf();
    let mut img_elem = PdfImage::from_path(path)?;
    img_elem.set_dpi(IMAGE_DPI);
    temp_files.push(tmp);
    doc.push(img_elem);
    Ok(())
}

fn push_photo(
    doc: &mut Document,
    temp_files: &mut Vec<NamedTempFile>,
    label: &str,
    photo: Option<&String>,
) -> Result<(), Box<dyn Error>> {
    let mut caption = Paragraph::new("");
    caption.push(StyledString::new(label, Style::new().italic()));
    doc.push(caption);

    match photo {
        Some(data) => match decode_photo(data) {
            Some(bytes) => embed_photo(doc, temp_files, &bytes)?,
            None => doc.push(Paragraph::new("[foto não incorporada]")),
        },
        None => doc.push(Paragraph::new("Sem registro.")),
    }
    Ok(())
}

fn push_request_section(
    doc: &mut Document,
    temp_files: &mut Vec<NamedTempFile>,
    request: &RepairRequestRecord,
    users: &[UserRecord],
) -> Result<(), Box<dyn Error>> {
    let technician = users
        .iter()
        .find(|u| u.id == request.technician_id)
        .map_or(UNRESOLVED, |u| u.name.as_str());

    let mut heading = Paragraph::new("");
    heading.push(StyledString::new(
        format!("Protocolo {} ({})", request.protocol, request.status.label()),
        Style::new().bold(),
    ));
    doc.push(heading);
    doc.push(Break::new(1));

    doc.push(labeled("Número SEI", &request.sei_number));
    doc.push(labeled("Contrato", &request.contract));
    doc.push(labeled("Zonal", request.zonal.id()));
    doc.push(labeled("Data da Visita", &request.visit_date));
    doc.push(labeled("Responsável", technician));
    doc.push(labeled("Endereço", &request.address));
    doc.push(labeled(
        "Coordenadas",
        &format!("{}, {}", request.latitude, request.longitude),
    ));
    doc.push(Break::new(1));

    let mut description_title = Paragraph::new("");
    description_title.push(StyledString::new("Descrição da Ocorrência", Style::new().bold()));
    doc.push(description_title);
    for line in request.description.lines() {
        doc.push(Paragraph::new(line));
    }
    doc.push(Break::new(1));

    let mut photos_title = Paragraph::new("");
    photos_title.push(StyledString::new("Registro Fotográfico", Style::new().bold()));
    doc.push(photos_title);
    push_photo(doc, temp_files, "Antes", request.photo_before.as_ref())?;
    push_photo(doc, temp_files, "Depois", request.photo_after.as_ref())?;
    Ok(())
}

/// Builds the full report document: a title page header followed by one
/// section per request, with photos embedded where present.
pub(crate) fn render_report(payload: &ReportPayload) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut doc = configure_document()?;

    // Keep temporary files alive until rendering finishes
    let mut temp_files: Vec<NamedTempFile> = Vec::new();

    let mut title = Paragraph::new("");
    title.push(StyledString::new(
        "Relatório de Visitas Técnicas - SGR-Vias",
        Style::new().bold(),
    ));
    doc.push(title);
    doc.push(Break::new(1));

    for (index, request) in payload.requests.iter().enumerate() {
        if index > 0 {
            doc.push(Break::new(2));
        }
        push_request_section(&mut doc, &mut temp_files, request, &payload.users)?;
    }

    let mut out = Vec::new();
    doc.render(&mut out)?;
    Ok(out)
}
