// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font registration and family resolution.
//!
//! [`FontLibrary`] wraps a `fontdb` database. Families are resolved by name,
//! by PostScript name, or through a CSS generic family (`serif`,
//! `sans-serif`, `monospace`, `cursive`, `fantasy`). A family that is not
//! registered is an error: the library never falls back to another family.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::TextError;

/// CSS generic font families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GenericFamily {
    /// `serif`
    Serif,
    /// `sans-serif`
    SansSerif,
    /// `monospace`
    Monospace,
    /// `cursive`
    Cursive,
    /// `fantasy`
    Fantasy,
}

impl GenericFamily {
    /// Parses a generic family keyword, ignoring ASCII case.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        const KEYWORDS: [(&str, GenericFamily); 6] = [
            ("serif", GenericFamily::Serif),
            ("sans-serif", GenericFamily::SansSerif),
            ("system-ui", GenericFamily::SansSerif),
            ("monospace", GenericFamily::Monospace),
            ("cursive", GenericFamily::Cursive),
            ("fantasy", GenericFamily::Fantasy),
        ];
        KEYWORDS
            .iter()
            .find(|(keyword, _)| keyword.eq_ignore_ascii_case(name))
            .map(|&(_, generic)| generic)
    }

    fn to_fontdb<'a>(self) -> fontdb::Family<'a> {
        match self {
            Self::Serif => fontdb::Family::Serif,
            Self::SansSerif => fontdb::Family::SansSerif,
            Self::Monospace => fontdb::Family::Monospace,
            Self::Cursive => fontdb::Family::Cursive,
            Self::Fantasy => fontdb::Family::Fantasy,
        }
    }
}

/// Typographic metrics of a face, scaled to a font size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontMetrics {
    /// Distance from the baseline to the top of the line box.
    pub ascent: f64,
    /// Distance from the baseline to the bottom of the line box (positive).
    pub descent: f64,
    /// Extra space between lines.
    pub leading: f64,
    /// Height of capital letters, when the face records it.
    pub cap_height: Option<f64>,
    /// Font units to points.
    pub scale: f64,
}

/// A face picked for one rebuild.
///
/// Holds a shared copy of the face bytes, so it stays valid after the library
/// changes. Drop it when the rebuild is done.
#[derive(Clone)]
pub struct ResolvedFont {
    data: Arc<Vec<u8>>,
    index: u32,
    family: String,
}

impl fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedFont")
            .field("family", &self.family)
            .field("index", &self.index)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl ResolvedFont {
    /// Family name of the face.
    #[must_use]
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Index of the face inside its font collection.
    #[must_use]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Raw font file bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Parses the face for shaping and outline extraction.
    pub(crate) fn face(&self) -> Result<rustybuzz::Face<'_>, TextError> {
        rustybuzz::Face::from_slice(&self.data, self.index).ok_or_else(|| {
            TextError::GlyphResolution {
                family: self.family.clone(),
            }
        })
    }

    /// Returns the face metrics scaled to `size`.
    ///
    /// # Errors
    ///
    /// [`TextError::GlyphResolution`] if the bytes do not parse.
    pub fn metrics(&self, size: f64) -> Result<FontMetrics, TextError> {
        let face = self.face()?;
        Ok(scaled_metrics(&face, size))
    }
}

pub(crate) fn scaled_metrics(face: &rustybuzz::Face<'_>, size: f64) -> FontMetrics {
    let scale = size / f64::from(face.units_per_em());
    FontMetrics {
        ascent: f64::from(face.ascender()) * scale,
        descent: -f64::from(face.descender()) * scale,
        leading: f64::from(face.line_gap()) * scale,
        cap_height: face.capital_height().map(|h| f64::from(h) * scale),
        scale,
    }
}

/// Registered fonts.
pub struct FontLibrary {
    db: fontdb::Database,
}

impl fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontLibrary")
            .field("faces", &self.db.len())
            .finish_non_exhaustive()
    }
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl FontLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self {
            db: fontdb::Database::new(),
        }
    }

    /// Creates a library with the system fonts loaded and the generic
    /// families mapped to the usual platform defaults.
    #[must_use]
    pub fn with_system_fonts() -> Self {
        let mut library = Self::new();
        library.load_system_fonts();
        #[cfg(target_os = "windows")]
        {
            library.set_generic_family(GenericFamily::Monospace, "Consolas");
            library.set_generic_family(GenericFamily::SansSerif, "Arial");
            library.set_generic_family(GenericFamily::Serif, "Times New Roman");
        }
        #[cfg(any(target_os = "macos", target_os = "ios"))]
        {
            library.set_generic_family(GenericFamily::Monospace, "Menlo");
            library.set_generic_family(GenericFamily::SansSerif, "Helvetica");
            library.set_generic_family(GenericFamily::Serif, "Times");
        }
        #[cfg(all(unix, not(any(target_os = "macos", target_os = "ios"))))]
        {
            library.set_generic_family(GenericFamily::Monospace, "DejaVu Sans Mono");
            library.set_generic_family(GenericFamily::SansSerif, "DejaVu Sans");
            library.set_generic_family(GenericFamily::Serif, "DejaVu Serif");
        }
        library
    }

    /// Loads the fonts of the system font directories.
    pub fn load_system_fonts(&mut self) {
        self.db.load_system_fonts();
    }

    /// Registers every face of a font file held in memory. Data that does not
    /// parse as a font is ignored.
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.db.load_font_data(data);
    }

    /// Registers every face of a font file on disk.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be read.
    pub fn load_font_file(&mut self, path: impl AsRef<Path>) -> std::io::Result<()> {
        self.db.load_font_file(path)
    }

    /// Maps a generic family to a concrete family name.
    pub fn set_generic_family(&mut self, generic: GenericFamily, family: impl Into<String>) {
        let family = family.into();
        match generic {
            GenericFamily::Serif => self.db.set_serif_family(family),
            GenericFamily::SansSerif => self.db.set_sans_serif_family(family),
            GenericFamily::Monospace => self.db.set_monospace_family(family),
            GenericFamily::Cursive => self.db.set_cursive_family(family),
            GenericFamily::Fantasy => self.db.set_fantasy_family(family),
        }
    }

    /// Number of registered faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Resolves `family` at `size` to a regular-weight, upright face.
    ///
    /// # Errors
    ///
    /// [`TextError::FontResolution`] if `size` is not a positive finite
    /// number, or if no registered face matches `family`.
    pub fn resolve(&self, family: &str, size: f64) -> Result<ResolvedFont, TextError> {
        let unresolved = || TextError::FontResolution {
            family: family.to_owned(),
            size,
        };
        if !(size.is_finite() && size > 0.0) {
            return Err(unresolved());
        }

        let families = [GenericFamily::parse(family)
            .map_or(fontdb::Family::Name(family), GenericFamily::to_fontdb)];
        let query = fontdb::Query {
            families: &families,
            weight: fontdb::Weight::NORMAL,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };
        let id = self
            .db
            .query(&query)
            .or_else(|| {
                self.db
                    .faces()
                    .find(|face| face.post_script_name == family)
                    .map(|face| face.id)
            })
            .ok_or_else(unresolved)?;

        let face_family = self
            .db
            .face(id)
            .and_then(|info| info.families.first())
            .map_or_else(|| family.to_owned(), |(name, _)| name.clone());
        let (data, index) = self
            .db
            .with_face_data(id, |data, index| (Arc::new(data.to_vec()), index))
            .ok_or_else(unresolved)?;

        Ok(ResolvedFont {
            data,
            index,
            family: face_family,
        })
    }
}

#[cfg(test)]
pub(crate) fn fixture_library() -> FontLibrary {
    let mut library = FontLibrary::new();
    library.load_font_data(
        include_bytes!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../fixtures/DejaVuSansMono.ttf"
        ))
        .to_vec(),
    );
    library
}

#[cfg(test)]
pub(crate) const FIXTURE_FAMILY: &str = "DejaVu Sans Mono";

/// A resolved font whose bytes are a truncated copy of the fixture.
#[cfg(test)]
pub(crate) fn truncated_font() -> ResolvedFont {
    let fixture = include_bytes!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../fixtures/DejaVuSansMono.ttf"
    ));
    ResolvedFont {
        data: Arc::new(fixture[..64].to_vec()),
        index: 0,
        family: FIXTURE_FAMILY.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_registered_family() {
        let library = fixture_library();
        assert_eq!(library.face_count(), 1, "fixture holds one face");
        let font = library.resolve(FIXTURE_FAMILY, 50.0).unwrap();
        assert_eq!(font.family(), FIXTURE_FAMILY);
        assert_eq!(font.index(), 0);
        assert!(!font.data().is_empty(), "bytes are shared with the font");
    }

    #[test]
    fn resolves_postscript_name() {
        let library = fixture_library();
        let font = library.resolve("DejaVuSansMono", 12.0).unwrap();
        assert_eq!(font.family(), FIXTURE_FAMILY);
    }

    #[test]
    fn unknown_family_is_not_substituted() {
        let library = fixture_library();
        let err = library.resolve("Comic Sans MS", 50.0).unwrap_err();
        assert_eq!(
            err,
            TextError::FontResolution {
                family: "Comic Sans MS".into(),
                size: 50.0,
            }
        );
    }

    #[test]
    fn invalid_size_fails() {
        let library = fixture_library();
        for size in [0.0, -4.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    library.resolve(FIXTURE_FAMILY, size),
                    Err(TextError::FontResolution { .. })
                ),
                "size {size} must be rejected"
            );
        }
    }

    #[test]
    fn generic_family_follows_mapping() {
        let mut library = fixture_library();
        library.set_generic_family(GenericFamily::Monospace, "Courier New");
        assert!(
            library.resolve("monospace", 20.0).is_err(),
            "mapped family is not registered"
        );
        library.set_generic_family(GenericFamily::Monospace, FIXTURE_FAMILY);
        let font = library.resolve("Monospace", 20.0).unwrap();
        assert_eq!(font.family(), FIXTURE_FAMILY);
    }

    #[test]
    fn generic_keywords_parse() {
        assert_eq!(GenericFamily::parse("sans-serif"), Some(GenericFamily::SansSerif));
        assert_eq!(GenericFamily::parse("SERIF"), Some(GenericFamily::Serif));
        assert_eq!(GenericFamily::parse("Helvetica"), None);
    }

    #[test]
    fn unparsable_bytes_fail_glyph_resolution() {
        let err = truncated_font().metrics(12.0).unwrap_err();
        assert_eq!(
            err,
            TextError::GlyphResolution {
                family: FIXTURE_FAMILY.into(),
            }
        );
    }

    #[test]
    fn metrics_scale_to_size() {
        let library = fixture_library();
        let font = library.resolve(FIXTURE_FAMILY, 2048.0).unwrap();
        let metrics = font.metrics(2048.0).unwrap();
        assert_eq!(metrics.scale, 1.0);
        assert_eq!(metrics.ascent, 1901.0);
        assert_eq!(metrics.descent, 483.0);
        assert_eq!(metrics.leading, 0.0);
    }
}
