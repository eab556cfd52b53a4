//! Boundary-marker records and their attribute syntax
//!
//! A marker is one comment line in a combined document. The comment wrapper
//! is grammar-specific (see `script`/`markup`); the body shared by both is
//!
//! ```text
//! spool:<role> id="..." path="..." raw="..." line=4 span=3
//! ```
//!
//! Quoted values escape `\`, `"` and `-`; the `-` escape keeps `--` out of
//! markup comments. Integers are bare. Any marker-looking line that does not
//! parse makes the whole document malformed; the unbundler never guesses.

/// Literal tag distinguishing marker comments from ordinary comments
pub const MARKER_TAG: &str = "spool:";

/// Role of a marker within a combined document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerRole {
    /// Document prologue: root module identity and original line count
    Root,
    /// Start of an inlined module's content
    Begin,
    /// End of an inlined module's content
    End,
    /// Back-reference to an already-inlined module, no content
    Ref,
}

impl MarkerRole {
    fn as_str(self) -> &'static str {
        match self {
            MarkerRole::Root => "root",
            MarkerRole::Begin => "begin",
            MarkerRole::End => "end",
            MarkerRole::Ref => "ref",
        }
    }

    fn parse(word: &str) -> Option<Self> {
        match word {
            "root" => Some(MarkerRole::Root),
            "begin" => Some(MarkerRole::Begin),
            "end" => Some(MarkerRole::End),
            "ref" => Some(MarkerRole::Ref),
            _ => None,
        }
    }
}

/// A manifest record attached to a position in a combined document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub role: MarkerRole,

    /// Module identifier, unique within one bundle operation
    pub id: String,

    /// Original workspace-relative path (root, begin)
    pub path: Option<String>,

    /// Original directive line, reproduced verbatim on unbundle (begin, ref)
    pub raw: Option<String>,

    /// First content line of the block within the combined document (begin)
    pub line: Option<usize>,

    /// Content line count of the block within the combined document (begin)
    pub span: Option<usize>,

    /// Original line count of the root module (root)
    pub lines: Option<usize>,
}

impl Marker {
    pub fn root(id: &str, path: &str, lines: usize) -> Self {
        Marker {
            role: MarkerRole::Root,
            id: id.to_string(),
            path: Some(path.to_string()),
            raw: None,
            line: None,
            span: None,
            lines: Some(lines),
        }
    }

    pub fn begin(id: &str, path: &str, raw: &str, line: usize, span: usize) -> Self {
        Marker {
            role: MarkerRole::Begin,
            id: id.to_string(),
            path: Some(path.to_string()),
            raw: Some(raw.to_string()),
            line: Some(line),
            span: Some(span),
            lines: None,
        }
    }

    pub fn end(id: &str) -> Self {
        Marker {
            role: MarkerRole::End,
            id: id.to_string(),
            path: None,
            raw: None,
            line: None,
            span: None,
            lines: None,
        }
    }

    pub fn back_ref(id: &str, raw: &str) -> Self {
        Marker {
            role: MarkerRole::Ref,
            id: id.to_string(),
            path: None,
            raw: Some(raw.to_string()),
            line: None,
            span: None,
            lines: None,
        }
    }

    /// Render the marker body (without the grammar's comment wrapper)
    pub fn render_body(&self) -> String {
        let mut body = format!("{}{} id={}", MARKER_TAG, self.role.as_str(), quote(&self.id));
        if let Some(path) = &self.path {
            body.push_str(&format!(" path={}", quote(path)));
        }
        if let Some(raw) = &self.raw {
            body.push_str(&format!(" raw={}", quote(raw)));
        }
        if let Some(line) = self.line {
            body.push_str(&format!(" line={}", line));
        }
        if let Some(span) = self.span {
            body.push_str(&format!(" span={}", span));
        }
        if let Some(lines) = self.lines {
            body.push_str(&format!(" lines={}", lines));
        }
        body
    }

    /// Parse a marker body. Returns a human-readable reason on failure;
    /// callers turn that into a recoverable malformed-bundle condition.
    pub fn parse_body(body: &str) -> std::result::Result<Marker, String> {
        let rest = body
            .strip_prefix(MARKER_TAG)
            .ok_or_else(|| format!("missing '{}' tag", MARKER_TAG))?;

        let (role_word, mut rest) = take_word(rest);
        let role = MarkerRole::parse(role_word)
            .ok_or_else(|| format!("unknown marker role '{}'", role_word))?;

        let mut id = None;
        let mut path = None;
        let mut raw = None;
        let mut line = None;
        let mut span = None;
        let mut lines = None;

        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                break;
            }
            let (key, value, tail) = take_attr(rest)?;
            rest = tail;
            match key {
                "id" => id = Some(value.into_string()?),
                "path" => path = Some(value.into_string()?),
                "raw" => raw = Some(value.into_string()?),
                "line" => line = Some(value.into_number()?),
                "span" => span = Some(value.into_number()?),
                "lines" => lines = Some(value.into_number()?),
                other => return Err(format!("unknown marker attribute '{}'", other)),
            }
        }

        let id = id.ok_or("marker missing id")?;
        let marker = Marker {
            role,
            id,
            path,
            raw,
            line,
            span,
            lines,
        };
        marker.validate()?;
        Ok(marker)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        let missing = |field: &str| format!("{} marker missing {}", self.role.as_str(), field);
        match self.role {
            MarkerRole::Root => {
                if self.path.is_none() {
                    return Err(missing("path"));
                }
                if self.lines.is_none() {
                    return Err(missing("lines"));
                }
            }
            MarkerRole::Begin => {
                if self.path.is_none() {
                    return Err(missing("path"));
                }
                if self.raw.is_none() {
                    return Err(missing("raw"));
                }
                if self.line.is_none() || self.span.is_none() {
                    return Err(missing("line/span"));
                }
            }
            MarkerRole::End => {}
            MarkerRole::Ref => {
                if self.raw.is_none() {
                    return Err(missing("raw"));
                }
            }
        }
        Ok(())
    }
}

/// Quote an attribute value, escaping `\`, `"` and `-`
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '-' => out.push_str("\\-"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

enum AttrValue {
    Text(String),
    Number(usize),
}

impl AttrValue {
    fn into_string(self) -> std::result::Result<String, String> {
        match self {
            AttrValue::Text(s) => Ok(s),
            AttrValue::Number(_) => Err("expected quoted value".to_string()),
        }
    }

    fn into_number(self) -> std::result::Result<usize, String> {
        match self {
            AttrValue::Number(n) => Ok(n),
            AttrValue::Text(_) => Err("expected numeric value".to_string()),
        }
    }
}

fn take_word(input: &str) -> (&str, &str) {
    let trimmed = input.trim_start();
    match trimmed.find(char::is_whitespace) {
        Some(idx) => (&trimmed[..idx], &trimmed[idx..]),
        None => (trimmed, ""),
    }
}

/// Parse one `key=value` attribute, returning the remaining input
fn take_attr(input: &str) -> std::result::Result<(&str, AttrValue, &str), String> {
    let eq = input
        .find('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", input))?;
    let key = &input[..eq];
    if key.is_empty() || key.contains(char::is_whitespace) {
        return Err(format!("invalid marker attribute key '{}'", key));
    }
    let rest = &input[eq + 1..];

    if let Some(quoted) = rest.strip_prefix('"') {
        let mut value = String::new();
        let mut chars = quoted.char_indices();
        loop {
            let (idx, ch) = chars
                .next()
                .ok_or("unterminated quoted marker value")?;
            match ch {
                '"' => {
                    return Ok((key, AttrValue::Text(value), &quoted[idx + 1..]));
                }
                '\\' => {
                    let (_, esc) = chars.next().ok_or("dangling escape in marker value")?;
                    match esc {
                        '\\' => value.push('\\'),
                        '"' => value.push('"'),
                        '-' => value.push('-'),
                        other => return Err(format!("unknown escape '\\{}'", other)),
                    }
                }
                other => value.push(other),
            }
        }
    }

    let (digits, tail) = take_word(rest);
    let number: usize = digits
        .parse()
        .map_err(|_| format!("invalid numeric marker value '{}'", digits))?;
    Ok((key, AttrValue::Number(number), tail))
}
