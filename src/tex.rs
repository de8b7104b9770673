//! Plain-text rendering of the small TeX fragments found in axis labels,
//! e.g. `Mass ($M_{\oplus}$)` → `Mass (M⊕)`.

const SYMBOLS: &[(&str, &str)] = &[
    ("oplus", "⊕"),
    ("odot", "⊙"),
    ("earth", "⊕"),
    ("sun", "☉"),
    ("star", "⋆"),
    ("alpha", "α"),
    ("beta", "β"),
    ("gamma", "γ"),
    ("delta", "δ"),
    ("sigma", "σ"),
    ("mu", "μ"),
    ("rho", "ρ"),
    ("theta", "θ"),
    ("lambda", "λ"),
    ("times", "×"),
    ("pm", "±"),
    ("cdot", "·"),
    ("log", "log"),
    ("mathrm", ""),
    ("rm", ""),
    ("textrm", ""),
];

/// Render `$…$` math segments as plain text; text outside them is kept.
pub fn render_tex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, part) in text.split('$').enumerate() {
        if i % 2 == 1 {
            out.push_str(&render_math(part));
        } else {
            out.push_str(part);
        }
    }
    out
}

/// Label text as it should appear, honouring the style switch.
pub fn display(text: &str, tex_labels: bool) -> String {
    if tex_labels {
        render_tex(text)
    } else {
        text.to_string()
    }
}

fn render_math(math: &str) -> String {
    let mut out = String::new();
    let mut chars = math.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let mut name = String::new();
                while let Some(&n) = chars.peek() {
                    if n.is_ascii_alphabetic() {
                        name.push(n);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if name.is_empty() {
                    // `\,` `\;` `\|` and friends.
                    match chars.next() {
                        Some(',' | ';' | ' ') => out.push(' '),
                        Some(other) => out.push(other),
                        None => {}
                    }
                    continue;
                }
                // A control word swallows one following space.
                chars.next_if_eq(&' ');
                match SYMBOLS.iter().find(|(k, _)| *k == name) {
                    Some((_, sym)) => out.push_str(sym),
                    None => out.push_str(&name),
                }
            }
            '_' | '^' => {
                let group = take_group(&mut chars);
                let rendered = render_math(&group);
                let mapped: Option<String> = rendered
                    .chars()
                    .map(|ch| if c == '_' { subscript(ch) } else { superscript(ch) })
                    .collect();
                match mapped {
                    Some(s) => out.push_str(&s),
                    None if c == '_' => out.push_str(&rendered),
                    None => {
                        out.push('^');
                        out.push_str(&rendered);
                    }
                }
            }
            '{' | '}' => {}
            other => out.push(other),
        }
    }
    out
}

fn take_group(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    match chars.next() {
        Some('{') => {
            let mut depth = 1;
            let mut group = String::new();
            for c in chars.by_ref() {
                match c {
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    _ => {}
                }
                group.push(c);
            }
            group
        }
        Some('\\') => {
            let mut group = String::from('\\');
            while let Some(&n) = chars.peek() {
                if n.is_ascii_alphabetic() {
                    group.push(n);
                    chars.next();
                } else {
                    break;
                }
            }
            group
        }
        Some(c) => c.to_string(),
        None => String::new(),
    }
}

fn subscript(c: char) -> Option<char> {
    Some(match c {
        '0'..='9' => char::from_u32('₀' as u32 + (c as u32 - '0' as u32))?,
        '+' => '₊',
        '-' => '₋',
        '(' => '₍',
        ')' => '₎',
        '⊕' | '⊙' => c,
        _ => return None,
    })
}

fn superscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4'..='9' => char::from_u32('⁴' as u32 + (c as u32 - '4' as u32))?,
        '+' => '⁺',
        '-' => '⁻',
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earth_units() {
        assert_eq!(render_tex("Mass ($M_{\\oplus}$)"), "Mass (M⊕)");
        assert_eq!(render_tex("Radius ($R_{\\oplus}$)"), "Radius (R⊕)");
    }

    #[test]
    fn conditional_bar() {
        assert_eq!(render_tex("f(r$|$m)"), "f(r|m)");
    }

    #[test]
    fn subscripts_and_superscripts() {
        assert_eq!(render_tex("$L_{12}$"), "L₁₂");
        assert_eq!(render_tex("$10^{-3}$ cm$^2$"), "10⁻³ cm²");
        assert_eq!(render_tex("$T_{\\rm eff}$"), "Teff");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(render_tex("Period (days)"), "Period (days)");
        assert_eq!(display("$M$", false), "$M$");
    }
}
