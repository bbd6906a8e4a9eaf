use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};

use super::error::ParseError;
use super::model::{Document, Point, Series};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read and parse an .agr file.
pub fn load_file(path: &Path) -> Result<Document> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let doc = parse_agr(&text).with_context(|| format!("parsing {}", path.display()))?;

    log::info!(
        "Loaded {} series ({} points) from {}, title {:?}",
        doc.len(),
        doc.point_count(),
        path.display(),
        doc.title
    );
    Ok(doc)
}

/// Parse the text of an .agr file produced by VMD.
///
/// The scan runs in two passes. The first walks the lines once and records
/// point blocks and legend names as independent facts keyed by series index.
/// The second joins the facts by index. A legend can therefore sit before or
/// after the data it names.
pub fn parse_agr(text: &str) -> Result<Document, ParseError> {
    let mut scan = Scan::default();
    for (i, raw) in text.lines().enumerate() {
        let line = classify(i + 1, raw)?;
        scan = scan.advance(line);
    }
    scan.finish()
}

// ---------------------------------------------------------------------------
// Line classification
// ---------------------------------------------------------------------------

/// One input line, classified.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Line {
    Blank,
    Comment,
    /// `&` – closes the open data block.
    Terminator,
    Directive(Directive),
    Data(Point),
    /// Anything not recognised; skipped.
    Text,
}

/// The `@` directives the reader understands.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Directive {
    Title(String),
    Subtitle(String),
    XLabel(String),
    YLabel(String),
    /// Legend text for series `index`, or for the most recently declared
    /// series when `index` is `None`.
    Legend { index: Option<usize>, name: String },
    /// `@ sN ...` – mentions series N without naming it.
    Declare(usize),
    /// `@target G0.SN` – the next data block belongs to series N.
    Target(usize),
    Type(String),
    Other(String),
}

pub(crate) fn classify(line_no: usize, raw: &str) -> Result<Line, ParseError> {
    let line = raw.trim();

    let Some(first) = line.chars().next() else {
        return Ok(Line::Blank);
    };

    match first {
        '#' => Ok(Line::Comment),
        '&' if line == "&" => Ok(Line::Terminator),
        '@' => Ok(Line::Directive(parse_directive(&line[1..]))),
        _ if looks_numeric(line) => {
            parse_data(line).map(Line::Data).map_err(|reason| ParseError::MalformedData {
                line: line_no,
                content: raw.trim_end_matches('\r').to_string(),
                reason,
            })
        }
        _ => {
            log::debug!("line {line_no}: skipping non-data line {line:?}");
            Ok(Line::Text)
        }
    }
}

/// A data line starts with a number (`nan` and `inf` included) or with
/// something that can only have been meant as one.
fn looks_numeric(line: &str) -> bool {
    let Some(first) = line.split_whitespace().next() else {
        return false;
    };
    first.parse::<f64>().is_ok()
        || first.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '.'))
}

fn parse_data(line: &str) -> std::result::Result<Point, String> {
    let mut tokens = line.split_whitespace();
    let (Some(x), Some(y)) = (tokens.next(), tokens.next()) else {
        return Err("expected at least two numbers".to_string());
    };
    Ok(Point::new(parse_number(x)?, parse_number(y)?))
}

fn parse_number(token: &str) -> std::result::Result<f64, String> {
    token
        .parse::<f64>()
        .map_err(|_| format!("`{token}` is not a number"))
}

// ---------------------------------------------------------------------------
// Directives
// ---------------------------------------------------------------------------

fn parse_directive(body: &str) -> Directive {
    let words = split_words(body);
    let Some(head) = words.first() else {
        return Directive::Other(String::new());
    };
    let command = head.text.to_ascii_lowercase();
    let arg = |i: usize| words.get(i).map(|w| w.text.as_str());

    let directive = match command.as_str() {
        "title" => arg(1).map(|t| Directive::Title(t.to_string())),
        "subtitle" => arg(1).map(|t| Directive::Subtitle(t.to_string())),
        "xaxis" | "yaxis" if words.len() == 3 && words[1].is_keyword("label") => {
            let label = words[2].text.clone();
            Some(if command == "xaxis" {
                Directive::XLabel(label)
            } else {
                Directive::YLabel(label)
            })
        }
        "legend" => parse_legend(&words),
        "target" => arg(1).and_then(target_index).map(Directive::Target),
        "type" => Some(Directive::Type(arg(1).unwrap_or_default().to_ascii_lowercase())),
        _ => series_index(&command).map(|index| match words.get(1) {
            Some(w) if w.is_keyword("legend") && words.len() >= 3 => Directive::Legend {
                index: Some(index),
                name: words[2].text.clone(),
            },
            _ => Directive::Declare(index),
        }),
    };

    directive.unwrap_or_else(|| {
        log::debug!("unrecognised directive: @{}", body.trim());
        Directive::Other(command)
    })
}

/// `legend string N "name"` or `legend "name"`. Legend box settings such as
/// `legend on` or `legend 0.8, 0.8` are not names.
fn parse_legend(words: &[Word]) -> Option<Directive> {
    match words {
        [_, kw, n, name, ..] if kw.is_keyword("string") => {
            let index = n.text.parse::<usize>().ok()?;
            Some(Directive::Legend {
                index: Some(index),
                name: name.text.clone(),
            })
        }
        [_, name] if name.quoted => Some(Directive::Legend {
            index: None,
            name: name.text.clone(),
        }),
        _ => None,
    }
}

/// `s12` → 12
fn series_index(word: &str) -> Option<usize> {
    let digits = word.strip_prefix('s')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// `G0.S3` or `S3` → 3
fn target_index(target: &str) -> Option<usize> {
    let lower = target.to_ascii_lowercase();
    let set = lower.rsplit('.').next()?;
    series_index(set)
}

// ---------------------------------------------------------------------------
// Shell-like word splitting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Word {
    pub text: String,
    /// Whether any part of the word was quoted.
    pub quoted: bool,
}

impl Word {
    fn is_keyword(&self, keyword: &str) -> bool {
        !self.quoted && self.text.eq_ignore_ascii_case(keyword)
    }
}

/// Split on whitespace, honouring `"..."` and `'...'` groups. Inside double
/// quotes a backslash escapes `"` and `\`. An unterminated quote runs to the
/// end of the line.
pub(crate) fn split_words(s: &str) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current: Option<Word> = None;
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if let Some(w) = current.take() {
                    words.push(w);
                }
            }
            '"' => {
                let word = current.get_or_insert_with(|| Word {
                    text: String::new(),
                    quoted: true,
                });
                word.quoted = true;
                while let Some(q) = chars.next() {
                    match q {
                        '"' => break,
                        '\\' if matches!(chars.peek(), Some('"') | Some('\\')) => {
                            if let Some(escaped) = chars.next() {
                                word.text.push(escaped);
                            }
                        }
                        other => word.text.push(other),
                    }
                }
            }
            '\'' => {
                let word = current.get_or_insert_with(|| Word {
                    text: String::new(),
                    quoted: true,
                });
                word.quoted = true;
                for q in chars.by_ref() {
                    if q == '\'' {
                        break;
                    }
                    word.text.push(q);
                }
            }
            other => current
                .get_or_insert_with(|| Word {
                    text: String::new(),
                    quoted: false,
                })
                .text
                .push(other),
        }
    }
    if let Some(w) = current {
        words.push(w);
    }
    words
}

// ---------------------------------------------------------------------------
// Scan state: first pass
// ---------------------------------------------------------------------------

/// Points collected for one series between terminators.
#[derive(Debug, Clone, PartialEq)]
struct Block {
    index: usize,
    points: Vec<Point>,
}

/// Accumulator for the first pass. Each line moves it forward via [`Scan::advance`].
#[derive(Debug, Default)]
pub(crate) struct Scan {
    /// Block under construction.
    open: Option<Block>,
    /// Index named by `@target`, claimed by the next block.
    pending_target: Option<usize>,
    /// Index given to the next block when no target is pending.
    next_index: usize,
    /// Most recently declared series.
    recent: Option<usize>,
    blocks: Vec<Block>,
    names: Vec<(usize, String)>,
    title: Option<String>,
    subtitle: Option<String>,
    x_label: Option<String>,
    y_label: Option<String>,
}

impl Scan {
    pub(crate) fn advance(mut self, line: Line) -> Self {
        match line {
            Line::Blank | Line::Comment | Line::Text => {}
            Line::Terminator => {
                self.recent = None;
                if self.open.is_none() {
                    if let Some(index) = self.pending_target.take() {
                        log::warn!("series {index} was declared but holds no data");
                        self.next_index = index + 1;
                    }
                }
                self.close_block();
            }
            Line::Data(point) => {
                let mut block = match self.open.take() {
                    Some(block) => block,
                    None => {
                        let index = self.pending_target.take().unwrap_or(self.next_index);
                        self.recent = Some(index);
                        Block {
                            index,
                            points: Vec::new(),
                        }
                    }
                };
                block.points.push(point);
                self.open = Some(block);
            }
            Line::Directive(directive) => self.apply(directive),
        }
        self
    }

    fn apply(&mut self, directive: Directive) {
        match directive {
            Directive::Title(t) => self.title = Some(t),
            Directive::Subtitle(t) => self.subtitle = Some(t),
            Directive::XLabel(t) => self.x_label = Some(t),
            Directive::YLabel(t) => self.y_label = Some(t),
            Directive::Legend { index, name } => {
                let index = index
                    .or(self.recent)
                    .or(self.pending_target)
                    .unwrap_or(self.next_index);
                self.recent = Some(index);
                self.names.push((index, name));
            }
            Directive::Declare(index) => self.recent = Some(index),
            Directive::Target(index) => {
                self.close_block();
                self.pending_target = Some(index);
                self.recent = Some(index);
            }
            Directive::Type(kind) => {
                if kind != "xy" {
                    log::warn!("unsupported set type {kind:?}; reading columns as x y");
                }
            }
            Directive::Other(_) => {}
        }
    }

    fn close_block(&mut self) {
        if let Some(block) = self.open.take() {
            self.next_index = block.index + 1;
            self.blocks.push(block);
        }
    }

    // -----------------------------------------------------------------------
    // Second pass: join facts by index
    // -----------------------------------------------------------------------

    pub(crate) fn finish(mut self) -> Result<Document, ParseError> {
        self.close_block();

        #[derive(Default)]
        struct Slot {
            points: Vec<Point>,
            name: Option<String>,
        }

        let mut slots: BTreeMap<usize, Slot> = BTreeMap::new();
        for block in self.blocks {
            slots.entry(block.index).or_default().points.extend(block.points);
        }
        for (index, name) in self.names {
            slots.entry(index).or_default().name = Some(name);
        }

        let mut series = Vec::with_capacity(slots.len());
        for (index, slot) in slots {
            if slot.points.is_empty() {
                log::warn!(
                    "dropping series {index} ({}): no data points",
                    slot.name.as_deref().unwrap_or("unnamed")
                );
                continue;
            }
            let name = slot.name.unwrap_or_else(|| (series.len() + 1).to_string());
            for x in repeated_x(&slot.points) {
                log::warn!("series {name:?}: x = {x} occurs more than once");
            }
            series.push(Series::new(name, slot.points));
        }

        if series.is_empty() {
            return Err(ParseError::EmptyDocument);
        }

        Ok(Document {
            series,
            title: self.title,
            subtitle: self.subtitle,
            x_label: self.x_label,
            y_label: self.y_label,
        })
    }
}

/// x values seen more than once, each reported once, in order of first repeat.
/// `NaN` never equals itself and is not reported.
fn repeated_x(points: &[Point]) -> Vec<f64> {
    let key = |x: f64| if x == 0.0 { 0 } else { x.to_bits() };
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    let mut repeated = Vec::new();
    for p in points.iter().filter(|p| !p.x.is_nan()) {
        if !seen.insert(key(p.x)) && reported.insert(key(p.x)) {
            repeated.push(p.x);
        }
    }
    repeated
}
