//! CSS font shorthand parsing
//!
//! `[style] [variant] [weight] [stretch] <size>[/<line-height>] <family>[, <family>]*`
//!
//! Enough of the grammar for canvas-style font strings such as
//! `24px -apple-system, sans-serif, Arial` or `italic bold 12pt "Times New Roman", serif`.

/// Size that `em`, `rem` and `%` are relative to
const ROOT_FONT_SIZE_PX: f32 = 16.0;

/// Keywords allowed before the size, at most this many
const MAX_PREFIX_TOKENS: usize = 4;

/// A font family as written in the shorthand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyName {
    Named(String),
    Serif,
    SansSerif,
    Monospace,
    Cursive,
    Fantasy,
    /// `system-ui`, `-apple-system` and `BlinkMacSystemFont`
    SystemUi,
}

/// Parsed font shorthand
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub size_px: f32,
    pub weight: u16,
    pub italic: bool,
    pub stretch: fontdb::Stretch,
    pub families: Vec<FamilyName>,
}

impl Default for FontSpec {
    /// `10px sans-serif`, the initial canvas font
    fn default() -> Self {
        Self {
            size_px: 10.0,
            weight: 400,
            italic: false,
            stretch: fontdb::Stretch::Normal,
            families: vec![FamilyName::SansSerif],
        }
    }
}

impl FontSpec {
    /// fontdb families in preference order
    pub fn query_families(&self) -> Vec<fontdb::Family<'_>> {
        self.families
            .iter()
            .map(|family| match family {
                FamilyName::Named(name) => fontdb::Family::Name(name),
                FamilyName::Serif => fontdb::Family::Serif,
                FamilyName::SansSerif | FamilyName::SystemUi => fontdb::Family::SansSerif,
                FamilyName::Monospace => fontdb::Family::Monospace,
                FamilyName::Cursive => fontdb::Family::Cursive,
                FamilyName::Fantasy => fontdb::Family::Fantasy,
            })
            .collect()
    }
}

/// Parse a CSS font shorthand; `None` when the string is not a valid font
pub fn parse_font(css: &str) -> Option<FontSpec> {
    let mut spec = FontSpec {
        families: Vec::new(),
        ..FontSpec::default()
    };

    let mut rest = css.trim();
    let mut prefix_tokens = 0;

    // Keywords up to and including the size token
    loop {
        let (token, tail) = next_token(rest)?;

        if apply_keyword(&mut spec, token) {
            prefix_tokens += 1;
            if prefix_tokens > MAX_PREFIX_TOKENS {
                return None;
            }
            rest = tail;
            continue;
        }

        let (size, inline_line_height) = match token.split_once('/') {
            Some((size, line_height)) => (size, Some(line_height)),
            None => (token, None),
        };
        spec.size_px = parse_size(size)?;
        rest = skip_line_height(tail, inline_line_height)?;
        break;
    }

    spec.families = parse_families(rest)?;
    Some(spec)
}

fn next_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    let end = input.find(char::is_whitespace).unwrap_or(input.len());
    Some((&input[..end], &input[end..]))
}

/// Consume the keyword if it is a style, variant, weight or stretch value
fn apply_keyword(spec: &mut FontSpec, token: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    match lower.as_str() {
        "normal" | "small-caps" => {},
        "italic" | "oblique" => spec.italic = true,
        "bold" | "bolder" => spec.weight = 700,
        "lighter" => spec.weight = 100,
        "ultra-condensed" => spec.stretch = fontdb::Stretch::UltraCondensed,
        "extra-condensed" => spec.stretch = fontdb::Stretch::ExtraCondensed,
        "condensed" => spec.stretch = fontdb::Stretch::Condensed,
        "semi-condensed" => spec.stretch = fontdb::Stretch::SemiCondensed,
        "semi-expanded" => spec.stretch = fontdb::Stretch::SemiExpanded,
        "expanded" => spec.stretch = fontdb::Stretch::Expanded,
        "extra-expanded" => spec.stretch = fontdb::Stretch::ExtraExpanded,
        "ultra-expanded" => spec.stretch = fontdb::Stretch::UltraExpanded,
        _ => match lower.parse::<u16>() {
            Ok(weight) if (1..=1000).contains(&weight) => spec.weight = weight,
            _ => return false,
        },
    }
    true
}

fn parse_size(token: &str) -> Option<f32> {
    let lower = token.to_ascii_lowercase();
    let keyword = match lower.as_str() {
        "xx-small" => Some(9.0),
        "x-small" => Some(10.0),
        "small" => Some(13.0),
        "medium" => Some(16.0),
        "large" => Some(18.0),
        "x-large" => Some(24.0),
        "xx-large" => Some(32.0),
        _ => None,
    };
    if keyword.is_some() {
        return keyword;
    }

    let split = lower
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(lower.len());
    let (number, unit) = lower.split_at(split);
    let value: f32 = number.parse().ok()?;

    let px = match unit {
        "px" => value,
        "pt" => value * 96.0 / 72.0,
        "pc" => value * 16.0,
        "in" => value * 96.0,
        "cm" => value * 96.0 / 2.54,
        "mm" => value * 96.0 / 25.4,
        "em" | "rem" => value * ROOT_FONT_SIZE_PX,
        "%" => value * ROOT_FONT_SIZE_PX / 100.0,
        _ => return None,
    };
    px.is_finite().then_some(px)
}

/// Step over `/ <line-height>` in whichever spacing it was written
fn skip_line_height<'a>(tail: &'a str, inline: Option<&str>) -> Option<&'a str> {
    match inline {
        // "24px/1.2" already consumed; "24px/" leaves it in the next token
        Some("") => next_token(tail).map(|(_, rest)| rest),
        Some(_) => Some(tail),
        None => {
            let trimmed = tail.trim_start();
            match trimmed.strip_prefix('/') {
                None => Some(tail),
                Some(after) => next_token(after).map(|(_, rest)| rest),
            }
        },
    }
}

fn parse_families(list: &str) -> Option<Vec<FamilyName>> {
    let mut families = Vec::new();
    for raw in list.split(',') {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let quoted = ['"', '\'']
            .iter()
            .find_map(|&q| raw.strip_prefix(q).and_then(|s| s.strip_suffix(q)));
        let family = match quoted {
            Some(name) => FamilyName::Named(name.to_string()),
            None => generic_family(raw).unwrap_or_else(|| {
                FamilyName::Named(raw.split_whitespace().collect::<Vec<_>>().join(" "))
            }),
        };
        families.push(family);
    }
    (!families.is_empty()).then_some(families)
}

fn generic_family(name: &str) -> Option<FamilyName> {
    match name.to_ascii_lowercase().as_str() {
        "serif" => Some(FamilyName::Serif),
        "sans-serif" => Some(FamilyName::SansSerif),
        "monospace" => Some(FamilyName::Monospace),
        "cursive" => Some(FamilyName::Cursive),
        "fantasy" => Some(FamilyName::Fantasy),
        "system-ui" | "-apple-system" | "blinkmacsystemfont" => Some(FamilyName::SystemUi),
        _ => None,
    }
}
