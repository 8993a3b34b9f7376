//! Typeface fonts
//!
//! Fonts use the three.js typeface JSON layout: a map of glyphs whose
//! outlines are a whitespace separated command stream expressed in font
//! units. Commands:
//!
//! - `m x y`: start a new contour
//! - `l x y`: line to
//! - `q x y cpx cpy`: quadratic curve to `(x, y)` with control point `(cpx, cpy)`
//! - `b x y c1x c1y c2x c2y`: cubic curve to `(x, y)`
//! - `z`: close (optional, contours are always closed)

use crate::error::{Result, SceneError};
use glam::Vec2;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::warn;

/// Glyph used in place of characters missing from the font
pub const FALLBACK_GLYPH: char = '?';

/// One glyph of a typeface
#[derive(Debug, Clone, Deserialize)]
pub struct Glyph {
    /// Horizontal advance in font units
    pub ha: f32,
    #[serde(default)]
    pub x_min: f32,
    #[serde(default)]
    pub x_max: f32,
    /// Outline command stream, absent for blanks such as the space
    #[serde(default)]
    pub o: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

/// Typeface description
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypefaceFont {
    pub glyphs: HashMap<String, Glyph>,
    #[serde(default)]
    pub family_name: String,
    /// Font units per em
    pub resolution: f32,
    pub bounding_box: BoundingBox,
    #[serde(default)]
    pub underline_thickness: f32,
}

/// Closed outlines of one placed glyph, in text space
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphShape {
    pub ch: char,
    /// Closed polylines, without repeated closing point
    pub contours: Vec<Vec<Vec2>>,
}

impl TypefaceFont {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        let mut buf = [0u8; 4];
        self.glyphs.get(ch.encode_utf8(&mut buf) as &str)
    }

    /// Distance between two baselines at `size`
    pub fn line_height(&self, size: f32) -> f32 {
        let bbox = &self.bounding_box;
        (bbox.y_max - bbox.y_min + self.underline_thickness) * self.scale(size)
    }

    fn scale(&self, size: f32) -> f32 {
        if self.resolution > 0.0 {
            size / self.resolution
        } else {
            0.0
        }
    }

    /// Lays out `text` and flattens every glyph outline
    ///
    /// Characters missing from the font are replaced by `?` when the font
    /// has it, skipped otherwise. `'\n'` starts a new line.
    pub fn generate_shapes(
        &self,
        text: &str,
        size: f32,
        curve_segments: usize,
    ) -> Result<Vec<GlyphShape>> {
        let scale = self.scale(size);
        let line_height = self.line_height(size);
        let segments = curve_segments.max(1);

        let mut shapes = Vec::new();
        let mut offset = Vec2::ZERO;

        for ch in text.chars() {
            if ch == '\n' {
                offset.x = 0.0;
                offset.y -= line_height;
                continue;
            }

            let (used, glyph) = match self.glyph(ch) {
                Some(glyph) => (ch, glyph),
                None => match self.glyph(FALLBACK_GLYPH) {
                    Some(glyph) => {
                        warn!(
                            character = %ch.escape_debug(),
                            font = %self.family_name,
                            "Character missing from font, using fallback glyph"
                        );
                        (FALLBACK_GLYPH, glyph)
                    }
                    None => {
                        warn!(
                            character = %ch.escape_debug(),
                            font = %self.family_name,
                            "Character missing from font, skipped"
                        );
                        continue;
                    }
                },
            };

            if let Some(outline) = glyph.o.as_deref() {
                let contours = flatten_outline(used, outline, scale, offset, segments)?;
                if !contours.is_empty() {
                    shapes.push(GlyphShape { ch: used, contours });
                }
            }
            offset.x += glyph.ha * scale;
        }

        Ok(shapes)
    }
}

/// Parses an outline command stream into closed polylines
fn flatten_outline(
    ch: char,
    outline: &str,
    scale: f32,
    offset: Vec2,
    segments: usize,
) -> Result<Vec<Vec<Vec2>>> {
    let mut tokens = outline.split_whitespace();
    let mut contours: Vec<Vec<Vec2>> = Vec::new();
    let mut current: Vec<Vec2> = Vec::new();

    let point = |tokens: &mut std::str::SplitWhitespace<'_>| -> Result<Vec2> {
        let x = number(ch, tokens.next())?;
        let y = number(ch, tokens.next())?;
        Ok(Vec2::new(x, y) * scale + offset)
    };

    while let Some(command) = tokens.next() {
        match command {
            "m" => {
                if !current.is_empty() {
                    contours.push(std::mem::take(&mut current));
                }
                current.push(point(&mut tokens)?);
            }
            "l" => {
                let to = point(&mut tokens)?;
                require_start(ch, &current)?;
                current.push(to);
            }
            "q" => {
                let to = point(&mut tokens)?;
                let control = point(&mut tokens)?;
                let from = require_start(ch, &current)?;
                for i in 1..=segments {
                    let t = i as f32 / segments as f32;
                    let u = 1.0 - t;
                    current.push(from * (u * u) + control * (2.0 * u * t) + to * (t * t));
                }
            }
            "b" => {
                let to = point(&mut tokens)?;
                let c1 = point(&mut tokens)?;
                let c2 = point(&mut tokens)?;
                let from = require_start(ch, &current)?;
                for i in 1..=segments {
                    let t = i as f32 / segments as f32;
                    let u = 1.0 - t;
                    current.push(
                        from * (u * u * u)
                            + c1 * (3.0 * u * u * t)
                            + c2 * (3.0 * u * t * t)
                            + to * (t * t * t),
                    );
                }
            }
            "z" => {
                if !current.is_empty() {
                    contours.push(std::mem::take(&mut current));
                }
            }
            other => {
                return Err(SceneError::Outline {
                    glyph: ch,
                    reason: format!("unknown command {:?}", other),
                });
            }
        }
    }
    if !current.is_empty() {
        contours.push(current);
    }

    Ok(contours.into_iter().filter_map(clean_contour).collect())
}

fn number(ch: char, token: Option<&str>) -> Result<f32> {
    let token = token.ok_or_else(|| SceneError::Outline {
        glyph: ch,
        reason: "truncated command".to_string(),
    })?;
    token.parse::<f32>().map_err(|_| SceneError::Outline {
        glyph: ch,
        reason: format!("invalid number {:?}", token),
    })
}

fn require_start(ch: char, current: &[Vec2]) -> Result<Vec2> {
    current.last().copied().ok_or_else(|| SceneError::Outline {
        glyph: ch,
        reason: "drawing command before 'm'".to_string(),
    })
}

/// Drops repeated points and the closing duplicate, rejects degenerate contours
fn clean_contour(points: Vec<Vec2>) -> Option<Vec<Vec2>> {
    const EPSILON: f32 = 1e-6;

    let mut cleaned: Vec<Vec2> = Vec::with_capacity(points.len());
    for p in points {
        if cleaned.last().is_none_or(|last| last.distance_squared(p) > EPSILON) {
            cleaned.push(p);
        }
    }
    while cleaned.len() > 1
        && cleaned[0].distance_squared(cleaned[cleaned.len() - 1]) <= EPSILON
    {
        cleaned.pop();
    }

    (cleaned.len() >= 3).then_some(cleaned)
}

/// Twice the signed area of a closed polyline, positive when counter-clockwise
pub fn signed_area(contour: &[Vec2]) -> f32 {
    let n = contour.len();
    (0..n)
        .map(|i| contour[i].perp_dot(contour[(i + 1) % n]))
        .sum::<f32>()
        * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FONT: &str = r#"{
        "familyName": "Test Mono",
        "resolution": 1000,
        "underlineThickness": 50,
        "boundingBox": {"xMin": 0, "xMax": 600, "yMin": -200, "yMax": 800},
        "glyphs": {
            "I": {"ha": 600, "x_min": 200, "x_max": 400, "o": "m 200 0 l 400 0 l 400 700 l 200 700 z"},
            "?": {"ha": 600, "x_min": 0, "x_max": 600, "o": "m 0 0 l 600 0 l 600 600 z"},
            " ": {"ha": 600, "x_min": 0, "x_max": 0},
            "o": {"ha": 600, "x_min": 0, "x_max": 600, "o": "m 0 0 q 600 0 300 -300 l 300 300 z"}
        }
    }"#;

    fn font() -> TypefaceFont {
        TypefaceFont::from_json(FONT).unwrap()
    }

    #[test]
    fn test_parse_font() {
        let font = font();
        assert_eq!(font.family_name, "Test Mono");
        assert_eq!(font.glyphs.len(), 4);
        assert!(font.glyph(' ').unwrap().o.is_none());
        assert_relative_eq!(font.line_height(10.0), 10.5);
    }

    #[test]
    fn test_layout_advances_and_scales() {
        let shapes = font().generate_shapes("I I", 10.0, 12).unwrap();

        assert_eq!(shapes.len(), 2);
        let expected = [
            Vec2::new(2.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 7.0),
            Vec2::new(2.0, 7.0),
        ];
        assert_eq!(shapes[0].contours[0].len(), expected.len());
        for (got, want) in shapes[0].contours[0].iter().zip(expected) {
            assert!(got.abs_diff_eq(want, 1e-5), "{:?} != {:?}", got, want);
        }
        // Two advances of 6 units each
        assert_relative_eq!(shapes[1].contours[0][0].x, 14.0);
    }

    #[test]
    fn test_newline_resets_x_and_lowers_y() {
        let shapes = font().generate_shapes("I\nI", 10.0, 12).unwrap();
        assert_eq!(shapes.len(), 2);
        assert_relative_eq!(shapes[1].contours[0][0].x, 2.0);
        assert_relative_eq!(shapes[1].contours[0][0].y, -10.5);
    }

    #[test]
    fn test_missing_glyph_uses_fallback() {
        let shapes = font().generate_shapes("É", 10.0, 12).unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].ch, '?');
    }

    #[test]
    fn test_missing_glyph_without_fallback_is_skipped() {
        let mut font = font();
        font.glyphs.remove("?");
        let shapes = font.generate_shapes("ÉI", 10.0, 12).unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].ch, 'I');
        // Skipped characters do not advance
        assert_relative_eq!(shapes[0].contours[0][0].x, 2.0);
    }

    #[test]
    fn test_quadratic_curve_is_flattened() {
        let shapes = font().generate_shapes("o", 1000.0, 4).unwrap();
        let contour = &shapes[0].contours[0];

        // Start point + 4 curve segments + final line point
        assert_eq!(contour.len(), 6);
        assert_relative_eq!(contour[4].x, 600.0);
        assert_relative_eq!(contour[4].y, 0.0);
        // Curve midpoint pulled halfway toward the control point
        assert_relative_eq!(contour[2].x, 300.0);
        assert_relative_eq!(contour[2].y, -150.0);
    }

    #[test]
    fn test_malformed_outline() {
        let mut font = font();
        font.glyphs.get_mut("I").unwrap().o = Some("m 0 0 l 10".to_string());
        assert!(matches!(
            font.generate_shapes("I", 10.0, 12),
            Err(SceneError::Outline { glyph: 'I', .. })
        ));

        font.glyphs.get_mut("I").unwrap().o = Some("l 0 0 l 10 10".to_string());
        assert!(font.generate_shapes("I", 10.0, 12).is_err());

        font.glyphs.get_mut("I").unwrap().o = Some("m 0 0 x 1 1".to_string());
        assert!(font.generate_shapes("I", 10.0, 12).is_err());
    }

    #[test]
    fn test_clean_contour_drops_duplicates() {
        let contour = clean_contour(vec![
            Vec2::ZERO,
            Vec2::ZERO,
            Vec2::X,
            Vec2::ONE,
            Vec2::ZERO,
        ])
        .unwrap();
        assert_eq!(contour, vec![Vec2::ZERO, Vec2::X, Vec2::ONE]);

        assert!(clean_contour(vec![Vec2::ZERO, Vec2::X, Vec2::ZERO]).is_none());
    }

    #[test]
    fn test_signed_area() {
        let ccw = [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];
        assert_relative_eq!(signed_area(&ccw), 1.0);

        let cw: Vec<Vec2> = ccw.iter().rev().copied().collect();
        assert_relative_eq!(signed_area(&cw), -1.0);
    }
}
