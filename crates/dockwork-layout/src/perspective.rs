//! `layout2` perspective strings.
//!
//! A perspective is a `|`-separated list of records after a `layout2`
//! header: one `key=value;…` record per pane, one `dock_size(d,l,r)=n`
//! record per dock, and an optional `constraint=x,y` record.
//!
//! ```text
//! layout2|name=files;caption=Files;state=1796;dir=4;layer=0;row=0;pos=0;prop=100000;
//!   bestw=200;besth=-1;…;floath=-1|dock_size(4,0,0)=200|constraint=0.333,0.333|
//! ```
//!
//! `;` and `|` inside names and captions are escaped with a backslash, as is
//! the backslash itself. A backslash before any other character is kept
//! literally, so strings from writers that do not escape backslashes still
//! load. Unset sizes and positions are written as an empty value; `-1` is
//! still read as an unset size component, but positions may be negative.

use std::fmt;
use std::fmt::Write as _;

use dockwork_core::geometry::{Point, Size};

use crate::dock::DockKey;
use crate::pane::{DockDirection, PaneFlags, PaneInfo};

/// Header of the only supported format version.
pub const PERSPECTIVE_HEADER: &str = "layout2";

const RECORD_SEPARATOR: char = '|';
const FIELD_SEPARATOR: char = ';';
const ESCAPE: char = '\\';

/// Perspective decode failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PerspectiveError {
    /// The string does not start with `layout2`.
    UnsupportedHeader(String),
    BadNumber { key: String, value: String },
    BadDirection(i32),
    /// A pane record without a `name` entry.
    MissingName,
    BadDockSize(String),
    BadConstraint(String),
}

impl fmt::Display for PerspectiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedHeader(header) => {
                write!(f, "unsupported perspective header {header:?}")
            }
            Self::BadNumber { key, value } => write!(f, "{key}: {value:?} is not an integer"),
            Self::BadDirection(code) => write!(f, "unknown dock direction {code}"),
            Self::MissingName => write!(f, "pane record has no name"),
            Self::BadDockSize(record) => write!(f, "malformed dock size record {record:?}"),
            Self::BadConstraint(record) => write!(f, "malformed constraint record {record:?}"),
        }
    }
}

impl std::error::Error for PerspectiveError {}

/// Decoded contents of a perspective string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Perspective {
    /// Pane records in string order; later records win over earlier ones
    /// with the same name when applied.
    pub panes: Vec<PaneInfo>,
    pub dock_sizes: Vec<(DockKey, i32)>,
    pub constraint: Option<(f64, f64)>,
}

/// Escape `;`, `|`, and `\`.
#[must_use]
pub fn escape_delimiters(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, RECORD_SEPARATOR | FIELD_SEPARATOR | ESCAPE) {
            out.push(ESCAPE);
        }
        out.push(ch);
    }
    out
}

/// Undo [`escape_delimiters`].
#[must_use]
pub fn unescape_delimiters(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == ESCAPE {
            if let Some(&next) = chars.peek() {
                if matches!(next, RECORD_SEPARATOR | FIELD_SEPARATOR | ESCAPE) {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(ch);
    }
    out
}

/// Split on unescaped `separator`, leaving escapes in the pieces.
fn split_unescaped(text: &str, separator: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (index, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if ch == ESCAPE {
            escaped = true;
        } else if ch == separator {
            pieces.push(&text[start..index]);
            start = index + ch.len_utf8();
        }
    }
    pieces.push(&text[start..]);
    pieces
}

fn size_fields(size: Option<Size>) -> (Option<i32>, Option<i32>) {
    size.map_or((None, None), |s| (Some(s.width), Some(s.height)))
}

fn point_fields(point: Option<Point>) -> (Option<i32>, Option<i32>) {
    point.map_or((None, None), |p| (Some(p.x), Some(p.y)))
}

/// `-1` is the legacy "unset" marker for size components.
fn size_from_fields(width: Option<i32>, height: Option<i32>) -> Option<Size> {
    let width = width.filter(|&w| w != -1);
    let height = height.filter(|&h| h != -1);
    if width.is_none() && height.is_none() {
        return None;
    }
    Some(Size::new(width.unwrap_or(-1), height.unwrap_or(-1)))
}

fn point_from_fields(x: Option<i32>, y: Option<i32>) -> Option<Point> {
    match (x, y) {
        (None, None) => None,
        (x, y) => Some(Point::new(x.unwrap_or(0), y.unwrap_or(0))),
    }
}

/// Unset values are written as an empty value.
fn field(value: Option<i32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Encode one pane as a `key=value;…` record.
#[must_use]
pub fn save_pane_info(pane: &PaneInfo) -> String {
    let state = (pane.flags - PaneFlags::RUNTIME_ONLY).bits();
    let (best_w, best_h) = size_fields(pane.best_size);
    let (min_w, min_h) = size_fields(pane.min_size);
    let (max_w, max_h) = size_fields(pane.max_size);
    let (float_x, float_y) = point_fields(pane.floating_pos);
    let (float_w, float_h) = size_fields(pane.floating_size);
    format!(
        "name={};caption={};state={state};dir={};layer={};row={};pos={};prop={};\
         bestw={};besth={};minw={};minh={};maxw={};maxh={};\
         floatx={};floaty={};floatw={};floath={}",
        escape_delimiters(&pane.name),
        escape_delimiters(&pane.caption),
        pane.direction.code(),
        pane.layer,
        pane.row,
        pane.pos,
        pane.proportion,
        field(best_w),
        field(best_h),
        field(min_w),
        field(min_h),
        field(max_w),
        field(max_h),
        field(float_x),
        field(float_y),
        field(float_w),
        field(float_h),
    )
}

fn parse_int(key: &str, value: &str) -> Result<i32, PerspectiveError> {
    value.parse().map_err(|_| PerspectiveError::BadNumber {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// An empty value is an unset field.
fn parse_optional(key: &str, value: &str) -> Result<Option<i32>, PerspectiveError> {
    if value.is_empty() {
        return Ok(None);
    }
    parse_int(key, value).map(Some)
}

/// Apply a `key=value;…` record to `pane`.
///
/// Keys are case-insensitive; unknown keys are ignored. Fields absent from
/// the record keep their current values. On error `pane` is left unchanged.
pub fn load_pane_info(record: &str, pane: &mut PaneInfo) -> Result<(), PerspectiveError> {
    let mut loaded = pane.clone();
    let (mut best_w, mut best_h) = size_fields(loaded.best_size);
    let (mut min_w, mut min_h) = size_fields(loaded.min_size);
    let (mut max_w, mut max_h) = size_fields(loaded.max_size);
    let (mut float_x, mut float_y) = point_fields(loaded.floating_pos);
    let (mut float_w, mut float_h) = size_fields(loaded.floating_size);

    for field in split_unescaped(record, FIELD_SEPARATOR) {
        let (key, value) = field.split_once('=').unwrap_or((field, ""));
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim();
        if key.is_empty() {
            break;
        }
        match key.as_str() {
            "name" => loaded.name = unescape_delimiters(value),
            "caption" => loaded.caption = unescape_delimiters(value),
            "state" => {
                let bits: u32 = value.parse().map_err(|_| PerspectiveError::BadNumber {
                    key: key.clone(),
                    value: value.to_string(),
                })?;
                loaded.flags = PaneFlags::from_bits_truncate(bits) - PaneFlags::RUNTIME_ONLY;
            }
            "dir" => {
                let code = parse_int(&key, value)?;
                loaded.direction =
                    DockDirection::from_code(code).ok_or(PerspectiveError::BadDirection(code))?;
            }
            "layer" => loaded.layer = parse_int(&key, value)?,
            "row" => loaded.row = parse_int(&key, value)?,
            "pos" => loaded.pos = parse_int(&key, value)?,
            "prop" => loaded.proportion = parse_int(&key, value)?,
            "bestw" => best_w = parse_optional(&key, value)?,
            "besth" => best_h = parse_optional(&key, value)?,
            "minw" => min_w = parse_optional(&key, value)?,
            "minh" => min_h = parse_optional(&key, value)?,
            "maxw" => max_w = parse_optional(&key, value)?,
            "maxh" => max_h = parse_optional(&key, value)?,
            "floatx" => float_x = parse_optional(&key, value)?,
            "floaty" => float_y = parse_optional(&key, value)?,
            "floatw" => float_w = parse_optional(&key, value)?,
            "floath" => float_h = parse_optional(&key, value)?,
            _ => dockwork_core::trace!(key = %key, "ignoring unknown perspective key"),
        }
    }

    loaded.best_size = size_from_fields(best_w, best_h);
    loaded.min_size = size_from_fields(min_w, min_h);
    loaded.max_size = size_from_fields(max_w, max_h);
    loaded.floating_pos = point_from_fields(float_x, float_y);
    loaded.floating_size = size_from_fields(float_w, float_h);
    *pane = loaded;
    Ok(())
}

/// Encode panes, dock sizes, and the dock size constraint.
#[must_use]
pub fn save_perspective(
    panes: &[PaneInfo],
    dock_sizes: impl IntoIterator<Item = (DockKey, i32)>,
    constraint: (f64, f64),
) -> String {
    let mut out = String::with_capacity(64 + panes.len() * 192);
    out.push_str(PERSPECTIVE_HEADER);
    out.push(RECORD_SEPARATOR);
    for pane in panes {
        out.push_str(&save_pane_info(pane));
        out.push(RECORD_SEPARATOR);
    }
    for (key, size) in dock_sizes {
        let _ = write!(
            out,
            "dock_size({},{},{})={size}{RECORD_SEPARATOR}",
            key.direction.code(),
            key.layer,
            key.row
        );
    }
    let _ = write!(
        out,
        "constraint={},{}{RECORD_SEPARATOR}",
        constraint.0, constraint.1
    );
    out
}

fn parse_dock_size(record: &str) -> Result<(DockKey, i32), PerspectiveError> {
    let bad = || PerspectiveError::BadDockSize(record.to_string());
    let (head, size) = record.split_once('=').ok_or_else(bad)?;
    let args = head
        .trim()
        .strip_prefix("dock_size(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(bad)?;
    let mut numbers = args.split(',').map(|n| n.trim().parse::<i32>());
    let (Some(Ok(dir)), Some(Ok(layer)), Some(Ok(row)), None) =
        (numbers.next(), numbers.next(), numbers.next(), numbers.next())
    else {
        return Err(bad());
    };
    let direction = DockDirection::from_code(dir).ok_or(PerspectiveError::BadDirection(dir))?;
    let size = size.trim().parse().map_err(|_| bad())?;
    Ok((DockKey::new(direction, layer, row), size))
}

fn parse_constraint(record: &str) -> Result<(f64, f64), PerspectiveError> {
    let bad = || PerspectiveError::BadConstraint(record.to_string());
    let value = record
        .split_once('=')
        .map(|(_, value)| value)
        .ok_or_else(bad)?;
    let (x, y) = value.split_once(',').ok_or_else(bad)?;
    let x: f64 = x.trim().parse().map_err(|_| bad())?;
    let y: f64 = y.trim().parse().map_err(|_| bad())?;
    if !x.is_finite() || !y.is_finite() {
        return Err(bad());
    }
    Ok((x, y))
}

/// Decode a perspective string.
///
/// Only a wrong header is an error. Malformed records are skipped with a
/// warning; parsing stops at the first empty record.
pub fn load_perspective(input: &str) -> Result<Perspective, PerspectiveError> {
    let _span = dockwork_core::debug_span!("perspective_load", len = input.len()).entered();
    let mut records = split_unescaped(input, RECORD_SEPARATOR).into_iter();
    let header = records.next().unwrap_or_default().trim();
    if header != PERSPECTIVE_HEADER {
        return Err(PerspectiveError::UnsupportedHeader(header.to_string()));
    }

    let mut perspective = Perspective::default();
    for record in records {
        let record = record.trim_end();
        if record.is_empty() {
            break;
        }
        let trimmed = record.trim_start();
        if trimmed.starts_with("dock_size") {
            match parse_dock_size(trimmed) {
                Ok(entry) => perspective.dock_sizes.push(entry),
                Err(err) => dockwork_core::warn!(error = %err, "skipping perspective record"),
            }
            continue;
        }
        if trimmed.starts_with("constraint=") {
            match parse_constraint(trimmed) {
                Ok(constraint) => perspective.constraint = Some(constraint),
                Err(err) => dockwork_core::warn!(error = %err, "skipping perspective record"),
            }
            continue;
        }
        let mut pane = PaneInfo::new();
        let parsed = load_pane_info(record, &mut pane).and_then(|()| {
            if pane.name.is_empty() {
                Err(PerspectiveError::MissingName)
            } else {
                Ok(())
            }
        });
        match parsed {
            Ok(()) => perspective.panes.push(pane),
            Err(err) => dockwork_core::warn!(error = %err, "skipping perspective record"),
        }
    }
    dockwork_core::debug!(
        panes = perspective.panes.len(),
        docks = perspective.dock_sizes.len(),
        "perspective decoded"
    );
    Ok(perspective)
}
