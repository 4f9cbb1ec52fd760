//! Static glyph-width table for the PDF base font, plus page geometry.
//!
//! Widths are Helvetica AFM advance widths in em units. The tables cover the
//! WinAnsi repertoire the sanitizer lets through: ASCII 0x20..=0x7E, Latin-1
//! 0xA0..=0xFF, and the typographic extras. Anything else gets the fallback width.

/// Millimetres per PostScript point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Geometry of every page in a rendered study plan. All lengths in millimetres.
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_left_mm: f32,
    pub margin_right_mm: f32,
    pub margin_top_mm: f32,
    /// Content may not extend below `page_height_mm - margin_bottom_mm`.
    pub margin_bottom_mm: f32,
    pub font_size_pt: f32,
    /// Vertical advance of one text line.
    pub line_height_mm: f32,
}

impl PageConfig {
    pub fn text_width_mm(&self) -> f32 {
        self.page_width_mm - self.margin_left_mm - self.margin_right_mm
    }

    /// Usable line width expressed in em units at the configured font size.
    pub fn text_width_em(&self) -> f32 {
        self.text_width_mm() / (self.font_size_pt * MM_PER_PT)
    }
}

/// A4 portrait, 12pt, 10mm sides and top, 20mm bottom break margin, 10mm lines.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        page_width_mm: 210.0,
        page_height_mm: 297.0,
        margin_left_mm: 10.0,
        margin_right_mm: 10.0,
        margin_top_mm: 10.0,
        margin_bottom_mm: 20.0,
        font_size_pt: 12.0,
        line_height_mm: 10.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [f32; 95],
    /// `latin1[i]` = width of U+00A0 + i.
    latin1: [f32; 96],
    /// Fallback width for characters outside both tables.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    pub fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        match code {
            0x20..=0x7E => self.widths[code - 0x20],
            0xA0..=0xFF => self.latin1[code - 0xA0],
            _ => match c {
                '\u{2018}' | '\u{2019}' | '\u{201A}' => 0.222,
                '\u{201C}' | '\u{201D}' | '\u{201E}' => 0.333,
                '\u{2013}' => 0.556,
                '\u{2014}' | '\u{2026}' | '\u{2030}' | '\u{2122}' | '\u{0152}' => 1.0,
                '\u{2022}' => 0.350,
                '\u{2039}' | '\u{203A}' => 0.333,
                '\u{0153}' => 0.944,
                '\u{0160}' => 0.667,
                '\u{0161}' | '\u{017E}' => 0.500,
                '\u{017D}' => 0.611,
                '\u{0178}' => 0.667,
                '\u{20AC}' | '\u{0192}' | '\u{2020}' | '\u{2021}' => 0.556,
                '\u{02C6}' | '\u{02DC}' => 0.333,
                _ => self.average_char_width,
            },
        }
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Rendered width of `s` in millimetres at `font_size_pt`.
    pub fn measure_mm(&self, s: &str, font_size_pt: f32) -> f32 {
        self.measure_str(s) * font_size_pt * MM_PER_PT
    }
}

/// Helvetica, the PDF base-14 sans-serif used for every rendered plan.
pub static HELVETICA: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    #[rustfmt::skip]
    latin1: [
        // nbsp   ¡      ¢      £      ¤      ¥      ¦      §      ¨      ©      ª      «      ¬      shy    ®      ¯
        0.278, 0.333, 0.556, 0.556, 0.556, 0.556, 0.260, 0.556, 0.333, 0.737, 0.370, 0.556, 0.584, 0.333, 0.737, 0.333,
        // °      ±      ²      ³      ´      µ      ¶      ·      ¸      ¹      º      »      ¼      ½      ¾      ¿
        0.400, 0.584, 0.333, 0.333, 0.333, 0.556, 0.537, 0.278, 0.333, 0.333, 0.365, 0.556, 0.834, 0.834, 0.834, 0.611,
        // À      Á      Â      Ã      Ä      Å      Æ      Ç      È      É      Ê      Ë      Ì      Í      Î      Ï
        0.667, 0.667, 0.667, 0.667, 0.667, 0.667, 1.000, 0.722, 0.667, 0.667, 0.667, 0.667, 0.278, 0.278, 0.278, 0.278,
        // Ð      Ñ      Ò      Ó      Ô      Õ      Ö      ×      Ø      Ù      Ú      Û      Ü      Ý      Þ      ß
        0.722, 0.722, 0.778, 0.778, 0.778, 0.778, 0.778, 0.584, 0.778, 0.722, 0.722, 0.722, 0.722, 0.667, 0.667, 0.611,
        // à      á      â      ã      ä      å      æ      ç      è      é      ê      ë      ì      í      î      ï
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.889, 0.500, 0.556, 0.556, 0.556, 0.556, 0.278, 0.278, 0.278, 0.278,
        // ð      ñ      ò      ó      ô      õ      ö      ÷      ø      ù      ú      û      ü      ý      þ      ÿ
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.584, 0.611, 0.556, 0.556, 0.556, 0.556, 0.500, 0.556, 0.500,
    ],
    average_char_width: 0.556,
    space_width: 0.278,
};
