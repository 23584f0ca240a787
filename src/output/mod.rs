use serde_json::Value;

use crate::api::client::Payload;
use crate::error::Result;

/// Bytes to write to stdout for a payload.
///
/// With `pretty`, JSON payloads are re-indented; anything else (XML, CSV)
/// passes through untouched, including Shift-JIS bytes.
pub fn render(payload: &Payload, pretty: bool) -> Result<Vec<u8>> {
    if pretty {
        if let Ok(value) = serde_json::from_slice::<Value>(payload.as_bytes()) {
            let mut out = serde_json::to_vec_pretty(&value)?;
            out.push(b'\n');
            return Ok(out);
        }
    }

    let mut out = payload.as_bytes().to_vec();
    if !out.ends_with(b"\n") {
        out.push(b'\n');
    }
    Ok(out)
}
