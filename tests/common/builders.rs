//! Test builders: render records into the shapes a generative backend
//! produces, so harnesses can start from known records and check that the
//! normalizer recovers them.
//!
//! These are for readability in tests, not production use. They panic on
//! invalid input rather than returning `Result`.

use rundown_core::{Record, Sequence};

// ---------------------------------------------------------------------------
// ResponseBuilder
// ---------------------------------------------------------------------------

/// How the records are laid out in the response text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Bare JSON array.
    Json,
    /// JSON array inside a fenced block.
    Fenced,
    /// Markdown table.
    Table,
}

/// Fluent builder for raw response fixtures.
///
/// # Example
///
/// ```rust
/// let raw = ResponseBuilder::new(Layout::Table)
///     .header(["Time", "Event", "Notes"])
///     .record("14:00", "迎賓", "準時開始")
///     .preamble("以下是流程：")
///     .build();
/// ```
pub struct ResponseBuilder {
    layout: Layout,
    records: Vec<Record>,
    header: [String; 3],
    keys: [String; 3],
    fence_tag: String,
    preamble: Option<String>,
    epilogue: Option<String>,
}

impl ResponseBuilder {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            records: Vec::new(),
            header: ["時間", "事件", "備註"].map(String::from),
            keys: ["時間", "事件", "備註"].map(String::from),
            fence_tag: "json".to_string(),
            preamble: None,
            epilogue: None,
        }
    }

    pub fn record(mut self, time: &str, event: &str, note: &str) -> Self {
        self.records.push(Record::new(time, event, note));
        self
    }

    pub fn records(mut self, records: impl IntoIterator<Item = Record>) -> Self {
        self.records.extend(records);
        self
    }

    /// Table header cells, naming the time, event and note columns in that
    /// order.
    pub fn header(mut self, cells: [&str; 3]) -> Self {
        self.header = cells.map(String::from);
        self
    }

    /// JSON keys for time, event and note.
    pub fn keys(mut self, keys: [&str; 3]) -> Self {
        self.keys = keys.map(String::from);
        self
    }

    pub fn fence_tag(mut self, tag: &str) -> Self {
        self.fence_tag = tag.to_string();
        self
    }

    pub fn preamble(mut self, text: &str) -> Self {
        self.preamble = Some(text.to_string());
        self
    }

    pub fn epilogue(mut self, text: &str) -> Self {
        self.epilogue = Some(text.to_string());
        self
    }

    pub fn build(self) -> String {
        let body = match self.layout {
            Layout::Json => json_array(&self.records, &self.keys),
            Layout::Fenced => format!(
                "```{}\n{}\n```",
                self.fence_tag,
                json_array(&self.records, &self.keys)
            ),
            Layout::Table => markdown_table(&self.records, &self.header),
        };
        let mut parts = Vec::new();
        parts.extend(self.preamble);
        parts.push(body);
        parts.extend(self.epilogue);
        parts.join("\n\n")
    }
}

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

/// Render records as a JSON array using `keys` for time, event and note.
pub fn json_array(records: &[Record], keys: &[String; 3]) -> String {
    let items: Vec<serde_json::Value> = records
        .iter()
        .map(|r| {
            let mut obj = serde_json::Map::new();
            obj.insert(keys[0].clone(), r.time.clone().into());
            obj.insert(keys[1].clone(), r.event.clone().into());
            obj.insert(keys[2].clone(), r.note.clone().into());
            serde_json::Value::Object(obj)
        })
        .collect();
    serde_json::to_string_pretty(&items).unwrap()
}

/// Render records as a Markdown table with a dashed separator row.
pub fn markdown_table(records: &[Record], header: &[String; 3]) -> String {
    let mut lines = vec![
        format!("| {} | {} | {} |", header[0], header[1], header[2]),
        "|---|---|---|".to_string(),
    ];
    for r in records {
        lines.push(format!("| {} | {} | {} |", r.time, r.event, r.note));
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// The three-record wedding rundown used across harnesses.
pub fn wedding_records() -> Vec<Record> {
    vec![
        Record::new("14:00", "迎賓", "準時開始"),
        Record::new("15:00", "敬酒", ""),
        Record::new("16:00", "切蛋糕", "拍照留念"),
    ]
}

/// Build a sequence from `(time, event, note)` triples.
pub fn sequence_of(rows: &[(&str, &str, &str)]) -> Sequence {
    rows.iter()
        .map(|(time, event, note)| Record::new(*time, *event, *note))
        .collect()
}
