//! # Calculation Report
//!
//! Renders one calculation to a PDF via Typst: a title block, the entered
//! values, every derived quantity with its formula, and the total.
//!
//! ## Architecture
//!
//! - The Typst template is an embedded string constant
//! - Values are escaped and injected in one placeholder pass
//! - Fonts come from `typst-assets`, so rendering needs no system fonts
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use estimate_core::catalog;
//! use estimate_core::formula::FormInputs;
//! use estimate_core::presenter::PresentationConfig;
//! use estimate_core::report::render_calculation_pdf;
//!
//! let spec = catalog::get("paver").unwrap();
//! let inputs = FormInputs::from_pairs([("surfaceLength", "10000"), ("surfaceWidth", "5000")]);
//! let pdf = render_calculation_pdf(spec, &inputs, &PresentationConfig::default(), "Driveway", "R. Mehta").unwrap();
//! std::fs::write("driveway.pdf", pdf).unwrap();
//! ```

use chrono::Utc;
use tracing::info;
use typst::diag::{FileError, FileResult, SourceDiagnostic};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::errors::{CalcError, CalcResult};
use crate::formula::{FormInputs, FormulaSpec};
use crate::presenter::{DetailView, PresentationConfig, ResultTable};

// ============================================================================
// Typst World
// ============================================================================

/// Single-file Typst world with the bundled fonts.
struct PdfWorld {
    main: Source,
    book: LazyHash<FontBook>,
    fonts: Vec<Font>,
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts: Vec<Font> = typst_assets::fonts()
            .flat_map(|data| Font::iter(Bytes::new(data.to_vec())))
            .collect();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// Template
// ============================================================================

const CALCULATION_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 2cm, bottom: 2cm, left: 2cm, right: 2cm),
  header: align(right)[
    #text(size: 9pt, fill: gray)[Site Estimate]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[{{CALCULATOR}}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(size: 11pt)

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[{{TITLE}}]
    #v(4pt)
    #text(size: 13pt)[{{CALCULATOR}} (#text(fill: gray)[{{CATEGORY}}])]
  ]
]

#v(12pt)

#table(
  columns: (auto, 1fr),
  stroke: none,
  row-gutter: 4pt,
  [*Prepared by:*], [{{PREPARED_BY}}],
  [*Date:*], [{{DATE}}],
)

#v(12pt)

== Calculation Data

#table(
  columns: (1fr, auto, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, center, right),
  table.header([*Input*], [*Symbol*], [*Value*]),
{{INPUT_ROWS}}
)

#v(12pt)

== Results

#table(
  columns: (auto, 1fr, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, left, right),
  table.header([*Material*], [*Formula*], [*Quantity*]),
{{OUTPUT_ROWS}}
)

{{TOTAL}}

#v(24pt)
#text(size: 9pt, fill: gray)[
  Quantities are estimates from the entered values and should be checked on site.
]
"##;

/// Render one calculation to PDF.
///
/// `title` and `prepared_by` are free text from the user; every value that
/// reaches the template is escaped.
///
/// # Errors
///
/// `CalcError::ReportFailed` when Typst compilation or PDF export fails.
pub fn render_calculation_pdf(
    spec: &FormulaSpec,
    inputs: &FormInputs,
    config: &PresentationConfig,
    title: &str,
    prepared_by: &str,
) -> CalcResult<Vec<u8>> {
    let source = calculation_source(spec, inputs, config, title, prepared_by);
    let world = PdfWorld::new(source);

    let warned = typst::compile(&world);
    let document = warned
        .output
        .map_err(|errors| CalcError::report_failed(format!("Typst compilation failed: {}", join_messages(&errors))))?;

    let pdf = typst_pdf::pdf(&document, &PdfOptions::default())
        .map_err(|errors| CalcError::report_failed(format!("PDF rendering failed: {}", join_messages(&errors))))?;

    info!(formula = spec.id, bytes = pdf.len(), "rendered calculation report");
    Ok(pdf)
}

fn join_messages(errors: &[SourceDiagnostic]) -> String {
    errors.iter().map(|e| e.message.to_string()).collect::<Vec<_>>().join("; ")
}

/// Typst source of the report
fn calculation_source(
    spec: &FormulaSpec,
    inputs: &FormInputs,
    config: &PresentationConfig,
    title: &str,
    prepared_by: &str,
) -> String {
    let outputs = spec.evaluate(inputs);
    let detail = DetailView::build(spec, inputs, &outputs, config);
    let table = ResultTable::build(spec, &outputs, config);

    let input_rows: String = detail
        .calculation_data
        .iter()
        .map(|d| {
            format!(
                "  [{}], [{}], [{}],\n",
                escape_typst(&d.label),
                escape_typst(&d.symbol),
                escape_typst(&d.value)
            )
        })
        .collect();

    let output_rows: String = detail
        .outputs
        .iter()
        .map(|o| {
            format!(
                "  [{}], [`{}`], [{}],\n",
                escape_typst(&o.label),
                o.formula.replace('`', "'"),
                escape_typst(&o.value)
            )
        })
        .collect();

    let total = table
        .total
        .map(|t| {
            format!(
                "#block(width: 100%, fill: rgb(\"#e8f0e8\"), inset: 10pt, radius: 4pt)[*{}:* #h(1fr) *{}*]",
                escape_typst(&t.label),
                escape_typst(&t.amount)
            )
        })
        .unwrap_or_default();

    let report_title = if title.trim().is_empty() { spec.title } else { title };

    fill_template(
        CALCULATION_TEMPLATE,
        &[
            ("TITLE", escape_typst(report_title).as_str()),
            ("CALCULATOR", escape_typst(spec.title).as_str()),
            ("CATEGORY", escape_typst(spec.category.display_name()).as_str()),
            ("PREPARED_BY", escape_typst(prepared_by).as_str()),
            ("DATE", Utc::now().format("%Y-%m-%d").to_string().as_str()),
            ("INPUT_ROWS", input_rows.as_str()),
            ("OUTPUT_ROWS", output_rows.as_str()),
            ("TOTAL", total.as_str()),
        ],
    )
}

/// Replace `{{NAME}}` placeholders in a single pass. Substituted text is
/// never scanned again, so user text that looks like a placeholder stays
/// literal. Unknown names are left as they are.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = &after[..end];
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

/// Escape characters with markup meaning in Typst content
fn escape_typst(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(
            c,
            '*' | '_' | '#' | '$' | '@' | '<' | '>' | '\\' | '`' | '[' | ']' | '/' | '-' | '+' | '=' | '~'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
