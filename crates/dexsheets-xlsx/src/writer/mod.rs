//! XLSX writer

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use quick_xml::escape::escape;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::XlsxStyleTable;
use dexsheets_core::{CellAddress, CellData, CellValue, Workbook, Worksheet};

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        let path = path.as_ref();
        log::info!("writing {}", path.display());
        let file = File::create(path)?;
        Self::write(workbook, file)
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        if workbook.is_empty() {
            return Err(XlsxError::InvalidFormat(
                "a workbook needs at least one worksheet".into(),
            ));
        }

        let mut zip = zip::ZipWriter::new(writer);

        let style_table = XlsxStyleTable::build(workbook);

        Self::write_content_types(&mut zip, workbook)?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_xml(&mut zip, workbook)?;
        Self::write_workbook_rels(&mut zip, workbook)?;
        Self::write_styles_xml(&mut zip, &style_table)?;

        for (i, sheet) in workbook.worksheets().enumerate() {
            Self::write_worksheet(&mut zip, sheet, i, &style_table)?;
        }

        zip.finish()?;
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
        }

        content.push_str("\n</Types>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("_rels/.rels", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/workbook.xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <bookViews>
        <workbookView activeTab="0"/>
    </bookViews>
    <sheets>"#,
        );

        for (i, sheet) in workbook.worksheets().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape(sheet.name()),
                i + 1,
                i + 1
            ));
        }

        content.push_str(
            r#"
    </sheets>
</workbook>"#,
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/_rels/workbook.xml.rels", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        let styles_rid = workbook.sheet_count() + 1;
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
            styles_rid
        ));

        content.push_str("\n</Relationships>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_styles_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        style_table: &XlsxStyleTable,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/styles.xml", options)?;
        let xml = style_table.to_styles_xml();
        zip.write_all(xml.as_bytes())?;
        Ok(())
    }

    fn write_worksheet<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        sheet: &Worksheet,
        index: usize,
        style_table: &XlsxStyleTable,
    ) -> XlsxResult<()> {
        log::debug!(
            "sheet{} '{}': {} cells, {} merges, {} conditional formats",
            index + 1,
            sheet.name(),
            sheet.cell_count(),
            sheet.merged_regions().len(),
            sheet.conditional_formats().len()
        );

        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(format!("xl/worksheets/sheet{}.xml", index + 1), options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        if let Some(range) = sheet.used_range() {
            content.push_str(&format!("\n    <dimension ref=\"{}\"/>", range));
        }

        Self::write_sheet_views(&mut content, sheet, index);

        content.push_str(&format!(
            "\n    <sheetFormatPr defaultRowHeight=\"{}\"/>",
            sheet.default_row_height()
        ));

        Self::write_columns(&mut content, sheet);

        content.push_str("\n    <sheetData>");
        Self::write_sheet_data(&mut content, sheet, index, style_table);
        content.push_str("\n    </sheetData>");

        let merged_regions = sheet.merged_regions();
        if !merged_regions.is_empty() {
            content.push_str(&format!(
                "\n    <mergeCells count=\"{}\">",
                merged_regions.len()
            ));
            for range in merged_regions {
                content.push_str(&format!("\n        <mergeCell ref=\"{}\"/>", range));
            }
            content.push_str("\n    </mergeCells>");
        }

        Self::write_conditional_formatting(&mut content, sheet, index, style_table);
        Self::write_data_validations(&mut content, sheet);

        content.push_str("\n</worksheet>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_sheet_views(content: &mut String, sheet: &Worksheet, index: usize) {
        let selected = if index == 0 { " tabSelected=\"1\"" } else { "" };

        let Some(panes) = sheet.freeze_panes() else {
            content.push_str(&format!(
                "\n    <sheetViews>\n        <sheetView{} workbookViewId=\"0\"/>\n    </sheetViews>",
                selected
            ));
            return;
        };

        let top_left = CellAddress::new(panes.row, panes.col).to_a1_string();
        let (split_attrs, active_pane) = match (panes.row, panes.col) {
            (0, col) => (format!(" xSplit=\"{}\"", col), "topRight"),
            (row, 0) => (format!(" ySplit=\"{}\"", row), "bottomLeft"),
            (row, col) => (
                format!(" xSplit=\"{}\" ySplit=\"{}\"", col, row),
                "bottomRight",
            ),
        };

        content.push_str(&format!(
            "\n    <sheetViews>\n        <sheetView{} workbookViewId=\"0\">\
             \n            <pane{} topLeftCell=\"{}\" activePane=\"{}\" state=\"frozen\"/>\
             \n            <selection pane=\"{}\" activeCell=\"{}\" sqref=\"{}\"/>\
             \n        </sheetView>\n    </sheetViews>",
            selected, split_attrs, top_left, active_pane, active_pane, top_left, top_left
        ));
    }

    fn write_columns(content: &mut String, sheet: &Worksheet) {
        let widths = sheet.custom_column_widths();
        if widths.is_empty() {
            return;
        }

        content.push_str("\n    <cols>");
        for (&col, &width) in widths {
            content.push_str(&format!(
                "\n        <col min=\"{}\" max=\"{}\" width=\"{}\" customWidth=\"1\"/>",
                col + 1,
                col + 1,
                width
            ));
        }
        content.push_str("\n    </cols>");
    }

    fn write_sheet_data(
        content: &mut String,
        sheet: &Worksheet,
        index: usize,
        style_table: &XlsxStyleTable,
    ) {
        // Rows with a custom height are written even when they hold no cells.
        let mut rows: BTreeMap<u32, Vec<(u16, &CellData)>> = BTreeMap::new();
        for (row, col, cell) in sheet.iter_cells() {
            rows.entry(row).or_default().push((col, cell));
        }
        for &row in sheet.custom_row_heights().keys() {
            rows.entry(row).or_default();
        }

        for (row, cells) in rows {
            let height_attr = match sheet.custom_row_heights().get(&row) {
                Some(height) => format!(" ht=\"{}\" customHeight=\"1\"", height),
                None => String::new(),
            };

            if cells.is_empty() {
                content.push_str(&format!("\n        <row r=\"{}\"{}/>", row + 1, height_attr));
                continue;
            }

            content.push_str(&format!("\n        <row r=\"{}\"{}>", row + 1, height_attr));
            for (col, cell) in cells {
                Self::write_cell(content, row, col, cell, index, style_table);
            }
            content.push_str("\n        </row>");
        }
    }

    fn write_cell(
        content: &mut String,
        row: u32,
        col: u16,
        cell: &CellData,
        sheet_index: usize,
        style_table: &XlsxStyleTable,
    ) {
        let cell_ref = CellAddress::new(row, col).to_a1_string();

        let xf_id = style_table.xf_id_for(sheet_index, cell.style_index);
        let style_attr = if xf_id != 0 {
            format!(" s=\"{}\"", xf_id)
        } else {
            String::new()
        };

        match &cell.value {
            CellValue::Number(n) => {
                content.push_str(&format!(
                    "\n            <c r=\"{}\"{}><v>{}</v></c>",
                    cell_ref, style_attr, n
                ));
            }
            CellValue::String(s) => {
                content.push_str(&format!(
                    "\n            <c r=\"{}\"{} t=\"inlineStr\"><is><t xml:space=\"preserve\">{}</t></is></c>",
                    cell_ref,
                    style_attr,
                    escape(s.as_str())
                ));
            }
            CellValue::Boolean(b) => {
                content.push_str(&format!(
                    "\n            <c r=\"{}\"{} t=\"b\"><v>{}</v></c>",
                    cell_ref,
                    style_attr,
                    if *b { 1 } else { 0 }
                ));
            }
            CellValue::Formula(text) => {
                let formula_text = text.strip_prefix('=').unwrap_or(text);
                content.push_str(&format!(
                    "\n            <c r=\"{}\"{}><f>{}</f></c>",
                    cell_ref,
                    style_attr,
                    escape(formula_text)
                ));
            }
            CellValue::Empty => {
                // Style-only cells (e.g. bordered empty slots)
                if xf_id != 0 {
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"{}/>",
                        cell_ref, style_attr
                    ));
                }
            }
        }
    }

    fn write_conditional_formatting(
        content: &mut String,
        sheet: &Worksheet,
        sheet_index: usize,
        style_table: &XlsxStyleTable,
    ) {
        // One <conditionalFormatting> element per rule
        for (rule_idx, rule) in sheet.conditional_formats().iter().enumerate() {
            if rule.ranges.is_empty() {
                log::warn!(
                    "skipping conditional format {} on '{}': no ranges",
                    rule_idx,
                    sheet.name()
                );
                continue;
            }

            content.push_str(&format!(
                "\n    <conditionalFormatting sqref=\"{}\">",
                rule.sqref()
            ));

            let dxf_attr = style_table
                .dxf_id_for(sheet_index, rule_idx)
                .map_or(String::new(), |id| format!(" dxfId=\"{}\"", id));
            content.push_str(&format!(
                "\n        <cfRule type=\"expression\" priority=\"{}\"{}>\n            <formula>{}</formula>\n        </cfRule>",
                rule.priority.max(1),
                dxf_attr,
                escape(rule.formula.as_str())
            ));

            content.push_str("\n    </conditionalFormatting>");
        }
    }

    fn write_data_validations(content: &mut String, sheet: &Worksheet) {
        let validations: Vec<_> = sheet
            .data_validations()
            .iter()
            .filter(|v| !v.ranges.is_empty())
            .collect();
        if validations.is_empty() {
            return;
        }

        content.push_str(&format!(
            "\n    <dataValidations count=\"{}\">",
            validations.len()
        ));

        for validation in validations {
            let allow_blank = if validation.allow_blank {
                " allowBlank=\"1\""
            } else {
                ""
            };
            // OOXML's showDropDown="1" hides the in-cell arrow
            let show_dropdown = if !validation.show_dropdown {
                " showDropDown=\"1\""
            } else {
                ""
            };
            let show_error = if validation.show_error_alert {
                " showErrorMessage=\"1\""
            } else {
                ""
            };
            let error_title = validation
                .error_title
                .as_ref()
                .map_or(String::new(), |t| format!(" errorTitle=\"{}\"", escape(t.as_str())));
            let error_msg = validation
                .error_message
                .as_ref()
                .map_or(String::new(), |m| format!(" error=\"{}\"", escape(m.as_str())));

            content.push_str(&format!(
                "\n        <dataValidation type=\"list\"{}{}{}{}{} sqref=\"{}\">\n            <formula1>{}</formula1>\n        </dataValidation>",
                allow_blank,
                show_dropdown,
                show_error,
                error_title,
                error_msg,
                validation.sqref(),
                escape(validation.formula1().as_str())
            ));
        }

        content.push_str("\n    </dataValidations>");
    }
}
