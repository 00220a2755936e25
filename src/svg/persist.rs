//! Binary and serde persistence for [`SvgObject`].
//!
//! Record layout (little endian):
//!
//! ```text
//! fill_type: u8
//! fill_color: f32 x 4   (r, g, b, a)
//! path_len: u64
//! path: [u8; path_len]  (UTF-8 path data, absolute M/L/Q/C/Z)
//! ```
//!
//! A file is the magic `MASV`, a `u32` version and a `u64` record count followed by records.

use std::io::{Read, Write};

use crate::foundation::core::{FillType, Rgba};
use crate::foundation::error::{MathAnimError, MathAnimResult};
use crate::svg::object::SvgObject;
use crate::svg::parse::parse_path_into;
use crate::svg::write::to_path_string;

/// Leading bytes of a persisted object file.
pub const FILE_MAGIC: [u8; 4] = *b"MASV";
/// Current container version.
pub const FILE_VERSION: u32 = 1;

const MAX_PATH_BYTES: u64 = 64 * 1024 * 1024;

fn read_array<const N: usize>(r: &mut impl Read, what: &str) -> MathAnimResult<[u8; N]> {
    let mut buf = [0u8; N];
    r.read_exact(&mut buf).map_err(|e| match e.kind() {
        std::io::ErrorKind::UnexpectedEof => {
            MathAnimError::serde(format!("truncated record while reading {what}"))
        }
        _ => MathAnimError::from(e),
    })?;
    Ok(buf)
}

/// Write one object record.
pub fn write_svg_object(w: &mut impl Write, obj: &SvgObject) -> MathAnimResult<()> {
    let path = to_path_string(obj);
    w.write_all(&[obj.fill_type.to_u8()])?;
    for c in [
        obj.fill_color.r,
        obj.fill_color.g,
        obj.fill_color.b,
        obj.fill_color.a,
    ] {
        w.write_all(&c.to_le_bytes())?;
    }
    w.write_all(&(path.len() as u64).to_le_bytes())?;
    w.write_all(path.as_bytes())?;
    Ok(())
}

/// Read one object record, rebuilding the geometry through the path parser.
pub fn read_svg_object(r: &mut impl Read) -> MathAnimResult<SvgObject> {
    let [tag] = read_array::<1>(r, "fill type")?;
    let fill_type = FillType::from_u8(tag)?;

    let mut ch = [0f32; 4];
    for c in &mut ch {
        *c = f32::from_le_bytes(read_array::<4>(r, "fill color")?);
    }

    let len = u64::from_le_bytes(read_array::<8>(r, "path length")?);
    if len > MAX_PATH_BYTES {
        return Err(MathAnimError::serde(format!(
            "path data length {len} exceeds limit {MAX_PATH_BYTES}"
        )));
    }
    let mut bytes = Vec::with_capacity(len as usize);
    r.take(len).read_to_end(&mut bytes)?;
    if bytes.len() as u64 != len {
        return Err(MathAnimError::serde("truncated record while reading path data"));
    }
    let text = String::from_utf8(bytes)
        .map_err(|e| MathAnimError::serde(format!("path data is not UTF-8: {e}")))?;

    object_from_parts(fill_type, Rgba::new(ch[0], ch[1], ch[2], ch[3]), &text)
}

/// Like [`read_svg_object`], but logs failures and yields a default object instead.
pub fn read_svg_object_or_default(r: &mut impl Read) -> SvgObject {
    match read_svg_object(r) {
        Ok(obj) => obj,
        Err(err) => {
            tracing::error!(error = %err, "failed to read svg object record");
            SvgObject::create_default()
        }
    }
}

/// Write a versioned file holding `objects`.
pub fn write_svg_file(w: &mut impl Write, objects: &[SvgObject]) -> MathAnimResult<()> {
    w.write_all(&FILE_MAGIC)?;
    w.write_all(&FILE_VERSION.to_le_bytes())?;
    w.write_all(&(objects.len() as u64).to_le_bytes())?;
    for obj in objects {
        write_svg_object(w, obj)?;
    }
    Ok(())
}

/// Read a file written by [`write_svg_file`].
pub fn read_svg_file(r: &mut impl Read) -> MathAnimResult<Vec<SvgObject>> {
    let magic = read_array::<4>(r, "file magic")?;
    if magic != FILE_MAGIC {
        return Err(MathAnimError::serde("not a mathanim object file (bad magic)"));
    }
    let version = u32::from_le_bytes(read_array::<4>(r, "file version")?);
    if version != FILE_VERSION {
        return Err(MathAnimError::serde(format!(
            "unsupported object file version {version}"
        )));
    }
    let count = u64::from_le_bytes(read_array::<8>(r, "record count")?);
    let mut out = Vec::new();
    for _ in 0..count {
        out.push(read_svg_object(r)?);
    }
    Ok(out)
}

fn object_from_parts(fill_type: FillType, fill_color: Rgba, path: &str) -> MathAnimResult<SvgObject> {
    let mut obj = SvgObject::create_default();
    parse_path_into(&mut obj, path)?;
    obj.fill_type = fill_type;
    obj.fill_color = fill_color;
    obj.finalize();
    Ok(obj)
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct SvgObjectRepr {
    #[serde(default)]
    fill_type: FillType,
    #[serde(default)]
    fill_color: Rgba,
    path: String,
}

impl serde::Serialize for SvgObject {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SvgObjectRepr {
            fill_type: self.fill_type,
            fill_color: self.fill_color,
            path: to_path_string(self),
        }
        .serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for SvgObject {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = SvgObjectRepr::deserialize(deserializer)?;
        object_from_parts(repr.fill_type, repr.fill_color, &repr.path)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/svg/persist.rs"]
mod tests;
