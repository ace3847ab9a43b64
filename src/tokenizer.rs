use csv::{ReaderBuilder, StringRecord, Trim};

/// One tokenized record and the 1-based line it started on.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub line: usize,
    pub fields: Vec<String>,
}

impl RawRow {
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.is_empty())
    }
}

fn reader(content: &str, delimiter: u8) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(delimiter)
        .from_reader(content.as_bytes())
}

/// Split a single line into trimmed fields.
///
/// Quoted fields may contain the delimiter and `""` stands for a literal quote.
/// An unterminated quote swallows the rest of the line into the last field.
/// Never fails: an empty line yields no fields.
pub fn split_line(line: &str, delimiter: u8) -> Vec<String> {
    let mut rdr = reader(line, delimiter);
    match rdr.records().next() {
        Some(Ok(record)) => record.iter().map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

/// A record that ran to end of input across lines with a quote still open.
fn runs_off_end(raw: &str, end: usize, len: usize) -> bool {
    end >= len
        && raw.trim_end_matches(['\r', '\n']).contains('\n')
        && raw.matches('"').count() % 2 == 1
}

/// Tokenize whole file content. Quoted fields may span lines.
///
/// A quote left open until end of input only damages its own line: that
/// line is re-split on its own and tokenizing resumes on the next one.
pub fn rows(content: &str, delimiter: u8) -> Vec<RawRow> {
    let mut out = Vec::new();
    let mut offset = 0;
    let mut lines_before = 0;

    'chunks: while offset < content.len() {
        let rest = &content[offset..];
        let mut rdr = reader(rest, delimiter);
        let mut record = StringRecord::new();
        loop {
            match rdr.read_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break 'chunks,
                Err(_) => continue,
            }
            let (start, line) = record
                .position()
                .map(|p| (p.byte() as usize, p.line() as usize))
                .unwrap_or((0, 1));
            let line = lines_before + line;
            let end = rdr.position().byte() as usize;
            let raw = rest.get(start..end).unwrap_or("");

            if runs_off_end(raw, end, rest.len()) {
                let first_len = raw.find('\n').unwrap_or(raw.len());
                let first = raw[..first_len].trim_end_matches('\r');
                out.push(RawRow {
                    line,
                    fields: split_line(first, delimiter),
                });
                offset += start + first_len + 1;
                lines_before = line;
                continue 'chunks;
            }

            out.push(RawRow {
                line,
                fields: record.iter().map(str::to_string).collect(),
            });
        }
    }
    out
}
