//! PNG export: ticketed capture sequence around the browser rasterizer.
//!
//! Export is the one multi-step operation:
//!
//! 1. `POST /api/card/export` records a [`PendingExport`], which puts the
//!    card in capture mode, and returns the capture-mode card plus a script.
//! 2. The script waits for layout to settle, rasterizes `#interview-card`
//!    with html2canvas, and posts the PNG data URL back with its ticket.
//! 3. `POST /api/card/export/complete` validates the PNG, drops the ticket
//!    and returns a script that saves the file.
//!
//! Capture mode lasts while any ticket is outstanding, so two exports fired
//! back to back both rasterize the static layout.

use crate::config::CardConfig;
use crate::data_uri;
use crate::error::{Error, Result};
use crate::html;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// An export between begin and completion.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingExport {
    pub ticket: u32,
    pub filename: String,
}

/// A validated PNG ready to be saved.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedImage {
    pub filename: String,
    pub data_url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ExportQueue {
    next_ticket: u32,
    pending: Vec<PendingExport>,
}

impl ExportQueue {
    pub fn begin(&mut self, filename: String) -> PendingExport {
        self.next_ticket = self.next_ticket.wrapping_add(1);
        let job = PendingExport {
            ticket: self.next_ticket,
            filename,
        };
        self.pending.push(job.clone());
        job
    }

    /// Remove and return the export for `ticket`.
    pub fn take(&mut self, ticket: u32) -> Result<PendingExport> {
        let pos = self
            .pending
            .iter()
            .position(|p| p.ticket == ticket)
            .ok_or(Error::UnknownExport(ticket))?;
        Ok(self.pending.remove(pos))
    }

    pub fn is_capturing(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }
}

/// `{name}.png`, or `{fallback}.png` when the name is blank. Characters
/// that cannot appear in a download filename become `_`.
pub fn export_filename(name: &str, fallback: &str) -> String {
    let stem = match name.trim() {
        "" => fallback.trim(),
        s => s,
    };
    let safe: String = stem
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{}.png", safe)
}

/// Validate a rasterizer PNG data URL and read its pixel size from IHDR.
pub fn png_dimensions(data_url: &str) -> Result<(u32, u32)> {
    let decoded = data_uri::decode(data_url).map_err(Error::InvalidPng)?;
    if decoded.mime != "image/png" {
        return Err(Error::InvalidPng(format!("unexpected media type {}", decoded.mime)));
    }
    let bytes = decoded.bytes;
    if bytes.len() < 24 || bytes[..8] != PNG_SIGNATURE {
        return Err(Error::InvalidPng("missing PNG signature".to_string()));
    }
    if &bytes[12..16] != b"IHDR" {
        return Err(Error::InvalidPng("first chunk is not IHDR".to_string()));
    }
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    if width == 0 || height == 0 {
        return Err(Error::InvalidPng("zero-sized image".to_string()));
    }
    Ok((width, height))
}

/// Script that waits `settle_delay_ms`, rasterizes the card and reports back.
pub fn render_capture_script(job: &PendingExport, config: &CardConfig) -> String {
    format!(
        r#"<script>
(function() {{
  var ticket = {ticket};
  function report(path, values) {{
    values.ticket = ticket;
    htmx.ajax('POST', path, {{values: values, target: '#interview-card-region', swap: 'innerHTML'}});
  }}
  setTimeout(function() {{
    var el = document.getElementById('interview-card');
    if (!el || typeof html2canvas !== 'function') {{
      report('/api/card/export/failed', {{msg: el ? 'html2canvas unavailable' : 'card not rendered'}});
      return;
    }}
    html2canvas(el, {{scale: {scale}, useCORS: true, backgroundColor: {background}}})
      .then(function(canvas) {{
        report('/api/card/export/complete', {{png: canvas.toDataURL('image/png')}});
      }})
      .catch(function(err) {{
        console.error('[interview] Rasterize failed', err);
        report('/api/card/export/failed', {{msg: String(err)}});
      }});
  }}, {delay});
}})();
</script>"#,
        ticket = job.ticket,
        scale = config.export_scale,
        background = html::js_string(&config.export_background),
        delay = config.settle_delay_ms,
    )
}

/// Script that saves the exported PNG under its filename.
pub fn render_download_script(image: &ExportedImage) -> String {
    format!(
        r#"<script>
(function() {{
  var a = document.createElement('a');
  a.href = {href};
  a.download = {filename};
  document.body.appendChild(a);
  a.click();
  a.remove();
  console.log('[interview] Exported ' + a.download + ' ({width}x{height})');
}})();
</script>"#,
        href = html::js_string(&image.data_url),
        filename = html::js_string(&image.filename),
        width = image.width,
        height = image.height,
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Smallest well-formed PNG header: signature + IHDR for a `w`x`h` image.
    pub(crate) fn png_data_url(w: u32, h: u32) -> String {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&w.to_be_bytes());
        bytes.extend_from_slice(&h.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
        data_uri::encode("image/png", &bytes)
    }

    #[test]
    fn filename_falls_back_to_interview() {
        assert_eq!(export_filename("", "interview"), "interview.png");
        assert_eq!(export_filename("   ", "interview"), "interview.png");
    }

    #[test]
    fn filename_uses_name() {
        assert_eq!(export_filename("Alice", "interview"), "Alice.png");
        assert_eq!(export_filename("アリス", "interview"), "アリス.png");
    }

    #[test]
    fn filename_replaces_path_characters() {
        assert_eq!(export_filename("a/b:c", "interview"), "a_b_c.png");
    }

    #[test]
    fn tickets_are_distinct_and_capture_tracks_pending() {
        let mut q = ExportQueue::default();
        assert!(!q.is_capturing());
        let a = q.begin("a.png".into());
        let b = q.begin("b.png".into());
        assert_ne!(a.ticket, b.ticket);
        assert_eq!(q.in_flight(), 2);

        assert_eq!(q.take(a.ticket).unwrap().filename, "a.png");
        assert!(q.is_capturing());
        assert_eq!(q.take(b.ticket).unwrap().filename, "b.png");
        assert!(!q.is_capturing());
    }

    #[test]
    fn take_unknown_ticket_errors() {
        let mut q = ExportQueue::default();
        assert_eq!(q.take(99), Err(Error::UnknownExport(99)));
    }

    #[test]
    fn reads_png_dimensions() {
        assert_eq!(png_dimensions(&png_data_url(1600, 900)).unwrap(), (1600, 900));
    }

    #[test]
    fn rejects_non_png_payloads() {
        let jpeg = data_uri::encode("image/png", &[0xff, 0xd8, 0xff, 0xe0]);
        assert!(matches!(png_dimensions(&jpeg), Err(Error::InvalidPng(_))));
        assert!(png_dimensions("data:image/png;base64,").is_err());
        assert!(png_dimensions(&png_data_url(0, 10)).is_err());
    }

    #[test]
    fn capture_script_carries_config() {
        let job = PendingExport { ticket: 7, filename: "x.png".into() };
        let js = render_capture_script(&job, &CardConfig::default());
        assert!(js.contains("var ticket = 7;"));
        assert!(js.contains("scale: 2,"));
        assert!(js.contains(r##"backgroundColor: "#ffffff""##));
        assert!(js.contains("}, 300);"));
        assert!(js.contains("/api/card/export/complete"));
        assert!(js.contains("/api/card/export/failed"));
    }

    #[test]
    fn download_script_names_file() {
        let image = ExportedImage {
            filename: "Alice.png".into(),
            data_url: png_data_url(2, 2),
            width: 2,
            height: 2,
        };
        let js = render_download_script(&image);
        assert!(js.contains(r#"a.download = "Alice.png";"#));
        assert!(js.contains("data:image/png;base64,"));
    }
}
