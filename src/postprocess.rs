/// Re-read the generated PDF with `lopdf` and save it again with its streams
/// compressed. Best-effort: any failure logs a warning and hands back the
/// original bytes, which are already a valid document.
pub fn resave(bytes: Vec<u8>) -> Vec<u8> {
    let t0 = std::time::Instant::now();
    match try_resave(&bytes) {
        Ok(out) => {
            log::debug!(
                "resave: {} → {} bytes in {:.1}ms",
                bytes.len(),
                out.len(),
                t0.elapsed().as_secs_f64() * 1000.0
            );
            out
        }
        Err(e) => {
            log::warn!("Post-process re-save failed ({e}), keeping original output");
            bytes
        }
    }
}

fn try_resave(bytes: &[u8]) -> Result<Vec<u8>, lopdf::Error> {
    let mut doc = lopdf::Document::load_mem(bytes)?;
    doc.compress();
    let mut out = Vec::with_capacity(bytes.len());
    doc.save_to(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_streams_come_back_flate_compressed() {
        use lopdf::{Document, Object, Stream, dictionary};

        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            b"0 0 1 rg 50 50 200 20 re f\n".repeat(40),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            "Contents" => content_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        doc.trailer.set("Root", catalog_id);
        let mut plain = Vec::new();
        doc.save_to(&mut plain).unwrap();

        let out = resave(plain.clone());
        assert!(out.len() < plain.len());
        let reread = Document::load_mem(&out).unwrap();
        assert_eq!(reread.get_pages().len(), 1);
        let stream = reread.get_object(content_id).unwrap().as_stream().unwrap();
        assert_eq!(stream.dict.get(b"Filter").unwrap().as_name().unwrap(), b"FlateDecode");
    }

    #[test]
    fn garbage_is_returned_unchanged() {
        let junk = b"not a pdf at all".to_vec();
        assert_eq!(resave(junk.clone()), junk);
    }
}
