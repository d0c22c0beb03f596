//! Named character reference table.
//!
//! [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html#named-character-references)
//!
//! The standard lists 2,231 names. This table carries every name that is
//! recognized without a trailing semicolon (the Latin-1 legacy set), plus
//! the punctuation, symbol, arrow, math, and Greek names that show up in
//! real documents.

/// One row of the table. `legacy` rows also match without the semicolon.
struct NamedReference {
    name: &'static str,
    value: &'static str,
    legacy: bool,
}

const fn legacy(name: &'static str, value: &'static str) -> NamedReference {
    NamedReference {
        name,
        value,
        legacy: true,
    }
}

const fn named(name: &'static str, value: &'static str) -> NamedReference {
    NamedReference {
        name,
        value,
        legacy: false,
    }
}

static TABLE: &[NamedReference] = &[
    // ASCII
    legacy("amp", "&"),
    legacy("AMP", "&"),
    legacy("lt", "<"),
    legacy("LT", "<"),
    legacy("gt", ">"),
    legacy("GT", ">"),
    legacy("quot", "\""),
    legacy("QUOT", "\""),
    named("apos", "'"),
    named("Tab", "\t"),
    named("NewLine", "\n"),
    named("fjlig", "fj"),
    // Latin-1 supplement
    legacy("nbsp", "\u{A0}"),
    legacy("iexcl", "\u{A1}"),
    legacy("cent", "\u{A2}"),
    legacy("pound", "\u{A3}"),
    legacy("curren", "\u{A4}"),
    legacy("yen", "\u{A5}"),
    legacy("brvbar", "\u{A6}"),
    legacy("sect", "\u{A7}"),
    legacy("uml", "\u{A8}"),
    legacy("copy", "\u{A9}"),
    legacy("COPY", "\u{A9}"),
    legacy("ordf", "\u{AA}"),
    legacy("laquo", "\u{AB}"),
    legacy("not", "\u{AC}"),
    legacy("shy", "\u{AD}"),
    legacy("reg", "\u{AE}"),
    legacy("REG", "\u{AE}"),
    legacy("macr", "\u{AF}"),
    legacy("deg", "\u{B0}"),
    legacy("plusmn", "\u{B1}"),
    legacy("sup2", "\u{B2}"),
    legacy("sup3", "\u{B3}"),
    legacy("acute", "\u{B4}"),
    legacy("micro", "\u{B5}"),
    legacy("para", "\u{B6}"),
    legacy("middot", "\u{B7}"),
    legacy("cedil", "\u{B8}"),
    legacy("sup1", "\u{B9}"),
    legacy("ordm", "\u{BA}"),
    legacy("raquo", "\u{BB}"),
    legacy("frac14", "\u{BC}"),
    legacy("frac12", "\u{BD}"),
    legacy("frac34", "\u{BE}"),
    legacy("iquest", "\u{BF}"),
    legacy("Agrave", "\u{C0}"),
    legacy("Aacute", "\u{C1}"),
    legacy("Acirc", "\u{C2}"),
    legacy("Atilde", "\u{C3}"),
    legacy("Auml", "\u{C4}"),
    legacy("Aring", "\u{C5}"),
    legacy("AElig", "\u{C6}"),
    legacy("Ccedil", "\u{C7}"),
    legacy("Egrave", "\u{C8}"),
    legacy("Eacute", "\u{C9}"),
    legacy("Ecirc", "\u{CA}"),
    legacy("Euml", "\u{CB}"),
    legacy("Igrave", "\u{CC}"),
    legacy("Iacute", "\u{CD}"),
    legacy("Icirc", "\u{CE}"),
    legacy("Iuml", "\u{CF}"),
    legacy("ETH", "\u{D0}"),
    legacy("Ntilde", "\u{D1}"),
    legacy("Ograve", "\u{D2}"),
    legacy("Oacute", "\u{D3}"),
    legacy("Ocirc", "\u{D4}"),
    legacy("Otilde", "\u{D5}"),
    legacy("Ouml", "\u{D6}"),
    legacy("times", "\u{D7}"),
    legacy("Oslash", "\u{D8}"),
    legacy("Ugrave", "\u{D9}"),
    legacy("Uacute", "\u{DA}"),
    legacy("Ucirc", "\u{DB}"),
    legacy("Uuml", "\u{DC}"),
    legacy("Yacute", "\u{DD}"),
    legacy("THORN", "\u{DE}"),
    legacy("szlig", "\u{DF}"),
    legacy("agrave", "\u{E0}"),
    legacy("aacute", "\u{E1}"),
    legacy("acirc", "\u{E2}"),
    legacy("atilde", "\u{E3}"),
    legacy("auml", "\u{E4}"),
    legacy("aring", "\u{E5}"),
    legacy("aelig", "\u{E6}"),
    legacy("ccedil", "\u{E7}"),
    legacy("egrave", "\u{E8}"),
    legacy("eacute", "\u{E9}"),
    legacy("ecirc", "\u{EA}"),
    legacy("euml", "\u{EB}"),
    legacy("igrave", "\u{EC}"),
    legacy("iacute", "\u{ED}"),
    legacy("icirc", "\u{EE}"),
    legacy("iuml", "\u{EF}"),
    legacy("eth", "\u{F0}"),
    legacy("ntilde", "\u{F1}"),
    legacy("ograve", "\u{F2}"),
    legacy("oacute", "\u{F3}"),
    legacy("ocirc", "\u{F4}"),
    legacy("otilde", "\u{F5}"),
    legacy("ouml", "\u{F6}"),
    legacy("divide", "\u{F7}"),
    legacy("oslash", "\u{F8}"),
    legacy("ugrave", "\u{F9}"),
    legacy("uacute", "\u{FA}"),
    legacy("ucirc", "\u{FB}"),
    legacy("uuml", "\u{FC}"),
    legacy("yacute", "\u{FD}"),
    legacy("thorn", "\u{FE}"),
    legacy("yuml", "\u{FF}"),
    // Latin extended and spacing modifiers
    named("OElig", "\u{152}"),
    named("oelig", "\u{153}"),
    named("Scaron", "\u{160}"),
    named("scaron", "\u{161}"),
    named("Yuml", "\u{178}"),
    named("fnof", "\u{192}"),
    named("circ", "\u{2C6}"),
    named("tilde", "\u{2DC}"),
    // Greek
    named("Alpha", "\u{391}"),
    named("Beta", "\u{392}"),
    named("Gamma", "\u{393}"),
    named("Delta", "\u{394}"),
    named("Epsilon", "\u{395}"),
    named("Zeta", "\u{396}"),
    named("Eta", "\u{397}"),
    named("Theta", "\u{398}"),
    named("Iota", "\u{399}"),
    named("Kappa", "\u{39A}"),
    named("Lambda", "\u{39B}"),
    named("Mu", "\u{39C}"),
    named("Nu", "\u{39D}"),
    named("Xi", "\u{39E}"),
    named("Omicron", "\u{39F}"),
    named("Pi", "\u{3A0}"),
    named("Rho", "\u{3A1}"),
    named("Sigma", "\u{3A3}"),
    named("Tau", "\u{3A4}"),
    named("Upsilon", "\u{3A5}"),
    named("Phi", "\u{3A6}"),
    named("Chi", "\u{3A7}"),
    named("Psi", "\u{3A8}"),
    named("Omega", "\u{3A9}"),
    named("alpha", "\u{3B1}"),
    named("beta", "\u{3B2}"),
    named("gamma", "\u{3B3}"),
    named("delta", "\u{3B4}"),
    named("epsilon", "\u{3B5}"),
    named("zeta", "\u{3B6}"),
    named("eta", "\u{3B7}"),
    named("theta", "\u{3B8}"),
    named("iota", "\u{3B9}"),
    named("kappa", "\u{3BA}"),
    named("lambda", "\u{3BB}"),
    named("mu", "\u{3BC}"),
    named("nu", "\u{3BD}"),
    named("xi", "\u{3BE}"),
    named("omicron", "\u{3BF}"),
    named("pi", "\u{3C0}"),
    named("rho", "\u{3C1}"),
    named("sigmaf", "\u{3C2}"),
    named("sigma", "\u{3C3}"),
    named("tau", "\u{3C4}"),
    named("upsilon", "\u{3C5}"),
    named("phi", "\u{3C6}"),
    named("chi", "\u{3C7}"),
    named("psi", "\u{3C8}"),
    named("omega", "\u{3C9}"),
    named("thetasym", "\u{3D1}"),
    named("upsih", "\u{3D2}"),
    named("piv", "\u{3D6}"),
    // General punctuation
    named("ensp", "\u{2002}"),
    named("emsp", "\u{2003}"),
    named("thinsp", "\u{2009}"),
    named("zwnj", "\u{200C}"),
    named("zwj", "\u{200D}"),
    named("lrm", "\u{200E}"),
    named("rlm", "\u{200F}"),
    named("ndash", "\u{2013}"),
    named("mdash", "\u{2014}"),
    named("lsquo", "\u{2018}"),
    named("rsquo", "\u{2019}"),
    named("sbquo", "\u{201A}"),
    named("ldquo", "\u{201C}"),
    named("rdquo", "\u{201D}"),
    named("bdquo", "\u{201E}"),
    named("dagger", "\u{2020}"),
    named("Dagger", "\u{2021}"),
    named("bull", "\u{2022}"),
    named("hellip", "\u{2026}"),
    named("permil", "\u{2030}"),
    named("prime", "\u{2032}"),
    named("Prime", "\u{2033}"),
    named("lsaquo", "\u{2039}"),
    named("rsaquo", "\u{203A}"),
    named("oline", "\u{203E}"),
    named("euro", "\u{20AC}"),
    named("trade", "\u{2122}"),
    // Arrows
    named("larr", "\u{2190}"),
    named("uarr", "\u{2191}"),
    named("rarr", "\u{2192}"),
    named("darr", "\u{2193}"),
    named("harr", "\u{2194}"),
    named("lArr", "\u{21D0}"),
    named("rArr", "\u{21D2}"),
    named("hArr", "\u{21D4}"),
    // Mathematical operators
    named("forall", "\u{2200}"),
    named("part", "\u{2202}"),
    named("exist", "\u{2203}"),
    named("empty", "\u{2205}"),
    named("nabla", "\u{2207}"),
    named("isin", "\u{2208}"),
    named("notin", "\u{2209}"),
    named("ni", "\u{220B}"),
    named("prod", "\u{220F}"),
    named("sum", "\u{2211}"),
    named("minus", "\u{2212}"),
    named("lowast", "\u{2217}"),
    named("radic", "\u{221A}"),
    named("prop", "\u{221D}"),
    named("infin", "\u{221E}"),
    named("ang", "\u{2220}"),
    named("and", "\u{2227}"),
    named("or", "\u{2228}"),
    named("cap", "\u{2229}"),
    named("cup", "\u{222A}"),
    named("int", "\u{222B}"),
    named("there4", "\u{2234}"),
    named("sim", "\u{223C}"),
    named("cong", "\u{2245}"),
    named("asymp", "\u{2248}"),
    named("ne", "\u{2260}"),
    named("equiv", "\u{2261}"),
    named("le", "\u{2264}"),
    named("ge", "\u{2265}"),
    named("sub", "\u{2282}"),
    named("sup", "\u{2283}"),
    named("nsub", "\u{2284}"),
    named("sube", "\u{2286}"),
    named("supe", "\u{2287}"),
    named("oplus", "\u{2295}"),
    named("otimes", "\u{2297}"),
    named("perp", "\u{22A5}"),
    named("sdot", "\u{22C5}"),
    named("lceil", "\u{2308}"),
    named("rceil", "\u{2309}"),
    named("lfloor", "\u{230A}"),
    named("rfloor", "\u{230B}"),
    named("lang", "\u{27E8}"),
    named("rang", "\u{27E9}"),
    // Shapes
    named("loz", "\u{25CA}"),
    named("spades", "\u{2660}"),
    named("clubs", "\u{2663}"),
    named("hearts", "\u{2665}"),
    named("diams", "\u{2666}"),
];

/// The longest named reference at the start of some input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedMatch {
    /// Bytes of input the reference covers, semicolon included if matched.
    pub len: usize,
    /// The replacement characters.
    pub value: &'static str,
    /// Whether the match ended with `;`.
    pub terminated: bool,
}

/// Find the longest named character reference that `input` starts with.
/// `input` must not include the leading `&`.
///
/// "Consume the maximum number of characters possible, where the consumed
/// characters are one of the identifiers in the named character references
/// table."
///
/// ```
/// use sapling_html::tokenizer::named_character_references::longest_match;
///
/// let m = longest_match("notin; x").unwrap();
/// assert_eq!(m.value, "\u{2209}");
/// assert!(m.terminated);
///
/// // "notit" only matches the legacy "not".
/// let m = longest_match("notit;").unwrap();
/// assert_eq!((m.len, m.terminated), (3, false));
/// ```
#[must_use]
pub fn longest_match(input: &str) -> Option<NamedMatch> {
    let mut best: Option<NamedMatch> = None;
    for entry in TABLE {
        let Some(after) = input.strip_prefix(entry.name) else {
            continue;
        };
        let candidate = if after.starts_with(';') {
            NamedMatch {
                len: entry.name.len() + 1,
                value: entry.value,
                terminated: true,
            }
        } else if entry.legacy {
            NamedMatch {
                len: entry.name.len(),
                value: entry.value,
                terminated: false,
            }
        } else {
            continue;
        };
        if best.is_none_or(|b| candidate.len > b.len) {
            best = Some(candidate);
        }
    }
    best
}

/// Look up a name exactly as written, semicolon included when required.
///
/// ```
/// use sapling_html::tokenizer::named_character_references::lookup;
///
/// assert_eq!(lookup("amp;"), Some("&"));
/// assert_eq!(lookup("amp"), Some("&"));
/// assert_eq!(lookup("hellip"), None);
/// ```
#[must_use]
pub fn lookup(name: &str) -> Option<&'static str> {
    longest_match(name)
        .filter(|m| m.len == name.len())
        .map(|m| m.value)
}
