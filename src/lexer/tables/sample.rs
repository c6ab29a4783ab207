// src/lexer/tables/sample.rs
// Small expression-language table: identifiers, keywords, ints, whitespace,
// comments and a handful of operators. Keywords outrank identifiers by
// priority; every token family hangs off the start state by an epsilon link.

use super::TableSpec;

const ALPHA: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_";
const DIGITS: &str = "0123456789";
const WHITE: &str = " \t\r\n";

pub const KEYWORDS: &[(&str, &str)] = &[("if", "If"), ("else", "Else"), ("while", "While")];

pub fn sample_table() -> TableSpec {
    let alnum = format!("{ALPHA}{DIGITS}");
    let mut t = TableSpec::new("start");

    // ---------- Ident ----------
    t.epsilon("start", "ident")
        .edge("ident", ALPHA, "ident_body")
        .edge("ident_body", &alnum, "ident_body")
        .accept("ident_body", "Ident", 0);

    // ---------- Keywords ----------
    for (word, token) in KEYWORDS {
        let root = format!("kw_{word}");
        t.epsilon("start", &root);
        let mut prev = root.clone();
        for (i, c) in word.char_indices() {
            let next = format!("{root}_{}", i + 1);
            t.edge(&prev, &c.to_string(), &next);
            prev = next;
        }
        t.accept(&prev, token, 1);
    }

    // ---------- Int ----------
    t.epsilon("start", "int")
        .edge("int", DIGITS, "int_body")
        .edge("int_body", DIGITS, "int_body")
        .accept("int_body", "Int", 0);

    // ---------- Whitespace ----------
    t.edge("start", WHITE, "white")
        .edge("white", WHITE, "white")
        .accept("white", "White", 0);

    // ---------- Slash / line comment ----------
    t.edge("start", "/", "slash")
        .accept("slash", "Slash", 0)
        .edge("slash", "/", "line_comment")
        .accept("line_comment", "LineComment", 0);
    let not_newline: String = (' '..='~').chain(['\t']).collect();
    t.edge("line_comment", &not_newline, "line_comment");

    // ---------- Operators ----------
    t.edge("start", "=", "assign")
        .accept("assign", "Assign", 0)
        .edge("assign", "=", "eqeq")
        .accept("eqeq", "EqEq", 0)
        .edge("start", "+", "plus")
        .accept("plus", "Plus", 0)
        .edge("start", "-", "minus")
        .accept("minus", "Minus", 0)
        .edge("start", "*", "star")
        .accept("star", "Star", 0)
        .edge("start", "(", "lparen")
        .accept("lparen", "LParen", 0)
        .edge("start", ")", "rparen")
        .accept("rparen", "RParen", 0);

    t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::scan::Scan;

    fn kinds_and_text(src: &str) -> Vec<(String, String)> {
        let nfa = sample_table().build_nfa();
        nfa.tokenize(src)
            .into_iter()
            .map(|t| {
                let kind = t.matched().cloned().unwrap_or_else(|| "?".to_string());
                (kind, t.text(src).to_string())
            })
            .filter(|(k, _)| k != "White")
            .collect()
    }

    #[test]
    fn keywords_beat_identifiers_only_on_exact_words() {
        let got = kinds_and_text("if iffy else x1 while");
        let want = [
            ("If", "if"),
            ("Ident", "iffy"),
            ("Else", "else"),
            ("Ident", "x1"),
            ("While", "while"),
        ];
        assert_eq!(got.len(), want.len());
        for ((gk, gt), (wk, wt)) in got.iter().zip(want) {
            assert_eq!((gk.as_str(), gt.as_str()), (wk, wt));
        }
    }

    #[test]
    fn operators_and_comments() {
        let got = kinds_and_text("a==b = 3 // trailing\n(x)*-2/y");
        let kinds: Vec<&str> = got.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            kinds,
            vec![
                "Ident", "EqEq", "Ident", "Assign", "Int", "LineComment", "LParen", "Ident",
                "RParen", "Star", "Minus", "Int", "Slash", "Ident",
            ]
        );
        assert_eq!(got[5].1, "// trailing");
    }

    #[test]
    fn unknown_chars_become_errors() {
        let got = kinds_and_text("a $ b");
        assert_eq!(got[1], ("?".to_string(), "$".to_string()));
    }
}
