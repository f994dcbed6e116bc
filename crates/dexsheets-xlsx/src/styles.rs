//! XLSX styles (styles.xml) writer helpers

use std::collections::HashMap;

use dexsheets_core::style::{
    Alignment, BorderStyle, Color, FillStyle, FontStyle, Style, FONT_NAME, FONT_SIZE,
};
use dexsheets_core::Workbook;

#[derive(Debug)]
pub(crate) struct XlsxStyleTable {
    /// Global, deduplicated styles. Index corresponds to the cellXfs index (xfId).
    styles: Vec<Style>,
    /// Per-worksheet mapping: local worksheet style index -> global xfId.
    sheet_maps: Vec<HashMap<u32, u32>>,
    /// DXF (differential format) styles for conditional formatting.
    dxf_styles: Vec<Style>,
    /// Mapping from (sheet_index, cf_rule_index) to dxf_id
    dxf_map: HashMap<(usize, usize), u32>,
}

#[derive(Debug, Clone, Copy)]
struct ResolvedXfIds {
    font_id: u32,
    fill_id: u32,
    border_id: u32,
}

impl XlsxStyleTable {
    pub(crate) fn build(workbook: &Workbook) -> Self {
        let mut styles: Vec<Style> = Vec::new();
        let mut style_to_xf: HashMap<Style, u32> = HashMap::new();

        // Index 0 is always default style
        let default = Style::default();
        styles.push(default.clone());
        style_to_xf.insert(default, 0);

        let mut sheet_maps: Vec<HashMap<u32, u32>> = Vec::with_capacity(workbook.sheet_count());

        let mut dxf_styles: Vec<Style> = Vec::new();
        let mut dxf_map: HashMap<(usize, usize), u32> = HashMap::new();
        let mut dxf_style_to_id: HashMap<Style, u32> = HashMap::new();

        for (sheet_idx, sheet) in workbook.worksheets().enumerate() {
            let mut map: HashMap<u32, u32> = HashMap::new();
            map.insert(0, 0);

            for (local_idx, style) in sheet.styles() {
                if local_idx == 0 {
                    continue;
                }

                let xf_id = match style_to_xf.get(style) {
                    Some(&id) => id,
                    None => {
                        let id = styles.len() as u32;
                        styles.push(style.clone());
                        style_to_xf.insert(style.clone(), id);
                        id
                    }
                };

                map.insert(local_idx, xf_id);
            }

            sheet_maps.push(map);

            for (rule_idx, rule) in sheet.conditional_formats().iter().enumerate() {
                if let Some(ref format) = rule.format {
                    let dxf_id = match dxf_style_to_id.get(format) {
                        Some(&id) => id,
                        None => {
                            let id = dxf_styles.len() as u32;
                            dxf_styles.push(format.clone());
                            dxf_style_to_id.insert(format.clone(), id);
                            id
                        }
                    };
                    dxf_map.insert((sheet_idx, rule_idx), dxf_id);
                }
            }
        }

        log::debug!(
            "style table: {} cell formats, {} differential formats",
            styles.len(),
            dxf_styles.len()
        );

        Self {
            styles,
            sheet_maps,
            dxf_styles,
            dxf_map,
        }
    }

    pub(crate) fn xf_id_for(&self, sheet_index: usize, local_style_index: u32) -> u32 {
        self.sheet_maps
            .get(sheet_index)
            .and_then(|m| m.get(&local_style_index).copied())
            .unwrap_or(0)
    }

    /// Get the DXF ID for a conditional format rule, if it has a format defined
    pub(crate) fn dxf_id_for(&self, sheet_index: usize, rule_index: usize) -> Option<u32> {
        self.dxf_map.get(&(sheet_index, rule_index)).copied()
    }

    pub(crate) fn to_styles_xml(&self) -> String {
        let mut font_ids: HashMap<FontStyle, u32> = HashMap::new();
        let mut fonts: Vec<FontStyle> = Vec::new();

        let default_font = FontStyle::default();
        fonts.push(default_font);
        font_ids.insert(default_font, 0);

        // Excel requires the first two fills to be none and gray125, so
        // custom fills start at id 2.
        let mut fill_ids: HashMap<FillStyle, u32> = HashMap::new();
        let mut fills: Vec<FillStyle> = Vec::new();

        let mut border_ids: HashMap<BorderStyle, u32> = HashMap::new();
        let mut borders: Vec<BorderStyle> = Vec::new();
        let default_border = BorderStyle::default();
        borders.push(default_border);
        border_ids.insert(default_border, 0);

        let mut resolved: Vec<ResolvedXfIds> = Vec::with_capacity(self.styles.len());

        for style in &self.styles {
            let font_id = match font_ids.get(&style.font) {
                Some(&id) => id,
                None => {
                    let id = fonts.len() as u32;
                    fonts.push(style.font);
                    font_ids.insert(style.font, id);
                    id
                }
            };

            let fill_id = match style.fill {
                FillStyle::None => 0,
                other => match fill_ids.get(&other) {
                    Some(&id) => id,
                    None => {
                        let id = fills.len() as u32 + 2;
                        fills.push(other);
                        fill_ids.insert(other, id);
                        id
                    }
                },
            };

            let border_id = match border_ids.get(&style.border) {
                Some(&id) => id,
                None => {
                    let id = borders.len() as u32;
                    borders.push(style.border);
                    border_ids.insert(style.border, id);
                    id
                }
            };

            resolved.push(ResolvedXfIds {
                font_id,
                fill_id,
                border_id,
            });
        }

        let mut xml = String::new();
        xml.push_str(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        xml.push_str(&format!("\n  <fonts count=\"{}\">", fonts.len()));
        for font in &fonts {
            xml.push_str("\n    ");
            xml.push_str(&write_font(font));
        }
        xml.push_str("\n  </fonts>");

        xml.push_str(&format!("\n  <fills count=\"{}\">", fills.len() + 2));
        xml.push_str("\n    <fill><patternFill patternType=\"none\"/></fill>");
        xml.push_str("\n    <fill><patternFill patternType=\"gray125\"/></fill>");
        for fill in &fills {
            xml.push_str("\n    ");
            xml.push_str(&write_fill(fill));
        }
        xml.push_str("\n  </fills>");

        xml.push_str(&format!("\n  <borders count=\"{}\">", borders.len()));
        for border in &borders {
            xml.push_str("\n    ");
            xml.push_str(&write_border(border));
        }
        xml.push_str("\n  </borders>");

        xml.push_str(
            r#"
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
        );

        xml.push_str(&format!("\n  <cellXfs count=\"{}\">", self.styles.len()));
        for (style, ids) in self.styles.iter().zip(&resolved) {
            xml.push_str("\n    ");
            xml.push_str(&write_xf(style, *ids));
        }
        xml.push_str("\n  </cellXfs>");

        xml.push_str(
            r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>"#,
        );

        if self.dxf_styles.is_empty() {
            xml.push_str("\n  <dxfs count=\"0\"/>");
        } else {
            xml.push_str(&format!("\n  <dxfs count=\"{}\">", self.dxf_styles.len()));
            for dxf_style in &self.dxf_styles {
                xml.push_str("\n    ");
                xml.push_str(&write_dxf(dxf_style));
            }
            xml.push_str("\n  </dxfs>");
        }

        xml.push_str(
            r#"
  <tableStyles count="0" defaultTableStyle="TableStyleMedium9" defaultPivotStyle="PivotStyleLight16"/>"#,
        );

        xml.push_str("\n</styleSheet>");
        xml
    }
}

fn write_color(tag: &str, color: &Color) -> String {
    match color {
        Color::Auto => format!("<{tag} auto=\"1\"/>"),
        other => format!("<{tag} rgb=\"{}\"/>", other.to_argb_hex()),
    }
}

fn write_font(font: &FontStyle) -> String {
    let mut s = String::from("<font>");
    if font.bold {
        s.push_str("<b/>");
    }
    s.push_str(&format!("<sz val=\"{}\"/>", FONT_SIZE));
    if !font.color.is_auto() {
        s.push_str(&write_color("color", &font.color));
    }
    s.push_str(&format!("<name val=\"{}\"/>", FONT_NAME));
    s.push_str("</font>");
    s
}

/// Font element inside a `<dxf>`: only the parts that differ from the
/// cell's own font, so size and family stay untouched.
fn write_dxf_font(font: &FontStyle) -> String {
    let mut s = String::from("<font>");
    if font.bold {
        s.push_str("<b/>");
    }
    if !font.color.is_auto() {
        s.push_str(&write_color("color", &font.color));
    }
    s.push_str("</font>");
    s
}

fn write_fill(fill: &FillStyle) -> String {
    match fill {
        FillStyle::None => "<fill><patternFill patternType=\"none\"/></fill>".to_string(),
        FillStyle::Solid { color } => format!(
            "<fill><patternFill patternType=\"solid\">{}<bgColor indexed=\"64\"/></patternFill></fill>",
            write_color("fgColor", color)
        ),
    }
}

/// Differential fills are read from `bgColor` by Excel and from `fgColor`
/// by some other consumers, so both carry the color.
fn write_dxf_fill(fill: &FillStyle) -> String {
    match fill {
        FillStyle::None => String::new(),
        FillStyle::Solid { color } => format!(
            "<fill><patternFill patternType=\"solid\">{}{}</patternFill></fill>",
            write_color("fgColor", color),
            write_color("bgColor", color)
        ),
    }
}

fn write_border(border: &BorderStyle) -> String {
    let mut s = String::from("<border>");
    for (tag, edge) in border.edges() {
        match edge {
            None => s.push_str(&format!("<{tag}/>")),
            Some(e) => s.push_str(&format!(
                "<{tag} style=\"{}\">{}</{tag}>",
                e.style.xlsx_name(),
                write_color("color", &e.color)
            )),
        }
    }
    s.push_str("<diagonal/>");
    s.push_str("</border>");
    s
}

fn write_alignment(al: &Alignment) -> String {
    let default = Alignment::default();
    if al == &default {
        return String::new();
    }

    let mut s = String::from("<alignment");
    if al.horizontal != default.horizontal {
        s.push_str(&format!(" horizontal=\"{}\"", al.horizontal.xlsx_name()));
    }
    if al.vertical != default.vertical {
        s.push_str(&format!(" vertical=\"{}\"", al.vertical.xlsx_name()));
    }
    s.push_str("/>");
    s
}

fn write_xf(style: &Style, ids: ResolvedXfIds) -> String {
    let mut attrs = String::new();
    if style.font.is_custom() {
        attrs.push_str(" applyFont=\"1\"");
    }
    if style.fill != FillStyle::None {
        attrs.push_str(" applyFill=\"1\"");
    }
    if style.border != BorderStyle::default() {
        attrs.push_str(" applyBorder=\"1\"");
    }
    if style.alignment != Alignment::default() {
        attrs.push_str(" applyAlignment=\"1\"");
    }

    let mut s = format!(
        "<xf numFmtId=\"0\" fontId=\"{}\" fillId=\"{}\" borderId=\"{}\" xfId=\"0\"{}",
        ids.font_id, ids.fill_id, ids.border_id, attrs
    );

    let alignment_xml = write_alignment(&style.alignment);
    if alignment_xml.is_empty() {
        s.push_str("/>");
        return s;
    }

    s.push('>');
    s.push_str(&alignment_xml);
    s.push_str("</xf>");
    s
}

/// Write a DXF (differential format) element for conditional formatting
fn write_dxf(style: &Style) -> String {
    let mut s = String::from("<dxf>");

    if style.font.is_custom() {
        s.push_str(&write_dxf_font(&style.font));
    }
    s.push_str(&write_dxf_fill(&style.fill));
    if !style.border.is_empty() {
        s.push_str(&write_border(&style.border));
    }

    s.push_str("</dxf>");
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use dexsheets_core::style::BorderLineStyle;
    use dexsheets_core::{CellRange, ConditionalFormatRule, Worksheet};

    fn sample_workbook() -> Workbook {
        let mut ws = Worksheet::new("Checklist");
        let bordered = Style::new().border(BorderStyle::all(BorderLineStyle::Thin, Color::BLACK));
        ws.set_cell_style_at(0, 0, &bordered.clone().bold(true)).unwrap();
        ws.set_cell_style_at(1, 0, &bordered).unwrap();
        ws.add_conditional_format(
            ConditionalFormatRule::expression("$A2=TRUE")
                .with_range(CellRange::parse("A2:F2").unwrap())
                .with_format(Style::new().fill_color(Color::rgb(183, 225, 205))),
        );
        ws.add_conditional_format(
            ConditionalFormatRule::expression("$A3=TRUE")
                .with_range(CellRange::parse("A3:F3").unwrap())
                .with_format(Style::new().fill_color(Color::rgb(183, 225, 205))),
        );
        let mut wb = Workbook::new();
        wb.push_worksheet(ws).unwrap();
        wb
    }

    #[test]
    fn test_style_table_maps_local_indexes() {
        let wb = sample_workbook();
        let table = XlsxStyleTable::build(&wb);

        assert_eq!(table.xf_id_for(0, 0), 0);
        assert_eq!(table.xf_id_for(0, 1), 1);
        assert_eq!(table.xf_id_for(0, 2), 2);
        assert_eq!(table.xf_id_for(3, 1), 0);
    }

    #[test]
    fn test_identical_dxf_styles_shared() {
        let wb = sample_workbook();
        let table = XlsxStyleTable::build(&wb);

        assert_eq!(table.dxf_id_for(0, 0), Some(0));
        assert_eq!(table.dxf_id_for(0, 1), Some(0));
        assert_eq!(table.dxf_id_for(0, 2), None);
    }

    #[test]
    fn test_styles_xml_contents() {
        let wb = sample_workbook();
        let xml = XlsxStyleTable::build(&wb).to_styles_xml();

        assert!(xml.contains("<cellXfs count=\"3\">"));
        assert!(xml.contains("<fills count=\"2\">"));
        assert!(xml.contains("<dxfs count=\"1\">"));
        assert!(xml.contains("<bgColor rgb=\"FFB7E1CD\"/>"));
        assert!(xml.contains("<left style=\"thin\"><color rgb=\"FF000000\"/></left>"));
    }

    #[test]
    fn test_dxf_font_omits_size() {
        let dxf = write_dxf(&Style::new().font_color(Color::WHITE));
        assert_eq!(dxf, "<dxf><font><color rgb=\"FFFFFFFF\"/></font></dxf>");
    }
}
