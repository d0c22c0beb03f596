//! [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
//!
//! Choosing the document's quirks mode from its DOCTYPE.

use sapling_dom::QuirksMode;

/// "The public identifier starts with" any of these, compared ASCII
/// case-insensitively, puts the document in quirks mode.
const QUIRKS_PUBLIC_ID_PREFIXES: &[&str] = &[
    "+//silmaril//dtd html pro v0r11 19970101//",
    "-//as//dtd html 3.0 aswedit + extensions//",
    "-//advasoft ltd//dtd html 3.0 aswedit + extensions//",
    "-//ietf//dtd html 2.0 level 1//",
    "-//ietf//dtd html 2.0 level 2//",
    "-//ietf//dtd html 2.0 strict level 1//",
    "-//ietf//dtd html 2.0 strict level 2//",
    "-//ietf//dtd html 2.0 strict//",
    "-//ietf//dtd html 2.0//",
    "-//ietf//dtd html 2.1e//",
    "-//ietf//dtd html 3.0//",
    "-//ietf//dtd html 3.2 final//",
    "-//ietf//dtd html 3.2//",
    "-//ietf//dtd html 3//",
    "-//ietf//dtd html level 0//",
    "-//ietf//dtd html level 1//",
    "-//ietf//dtd html level 2//",
    "-//ietf//dtd html level 3//",
    "-//ietf//dtd html strict level 0//",
    "-//ietf//dtd html strict level 1//",
    "-//ietf//dtd html strict level 2//",
    "-//ietf//dtd html strict level 3//",
    "-//ietf//dtd html strict//",
    "-//ietf//dtd html//",
    "-//metrius//dtd metrius presentational//",
    "-//microsoft//dtd internet explorer 2.0 html strict//",
    "-//microsoft//dtd internet explorer 2.0 html//",
    "-//microsoft//dtd internet explorer 2.0 tables//",
    "-//microsoft//dtd internet explorer 3.0 html strict//",
    "-//microsoft//dtd internet explorer 3.0 html//",
    "-//microsoft//dtd internet explorer 3.0 tables//",
    "-//netscape comm. corp.//dtd html//",
    "-//netscape comm. corp.//dtd strict html//",
    "-//o'reilly and associates//dtd html 2.0//",
    "-//o'reilly and associates//dtd html extended 1.0//",
    "-//o'reilly and associates//dtd html extended relaxed 1.0//",
    "-//sq//dtd html 2.0 hotmetal + extensions//",
    "-//softquad software//dtd hotmetal pro 6.0::19990601::extensions to html 4.0//",
    "-//softquad//dtd hotmetal pro 4.0::19971010::extensions to html 4.0//",
    "-//spyglass//dtd html 2.0 extended//",
    "-//sun microsystems corp.//dtd hotjava html//",
    "-//sun microsystems corp.//dtd hotjava strict html//",
    "-//w3c//dtd html 3 1995-03-24//",
    "-//w3c//dtd html 3.2 draft//",
    "-//w3c//dtd html 3.2 final//",
    "-//w3c//dtd html 3.2//",
    "-//w3c//dtd html 3.2s draft//",
    "-//w3c//dtd html 4.0 frameset//",
    "-//w3c//dtd html 4.0 transitional//",
    "-//w3c//dtd html experimental 19960712//",
    "-//w3c//dtd html experimental 970421//",
    "-//w3c//dtd w3 html//",
    "-//w3o//dtd w3 html 3.0//",
    "-//webtechs//dtd mozilla html 2.0//",
    "-//webtechs//dtd mozilla html//",
];

/// "The public identifier is set to" one of these.
const QUIRKS_PUBLIC_IDS: &[&str] = &[
    "-//w3o//dtd w3 html strict 3.0//en//",
    "-/w3c/dtd html 4.0 transitional/en",
    "html",
];

const QUIRKS_SYSTEM_ID: &str = "http://www.ibm.com/data/dtd/v11/ibmxhtml1-transitional.dtd";

/// Quirks without a system identifier, limited quirks with one.
const HTML4_PUBLIC_ID_PREFIXES: &[&str] = &[
    "-//w3c//dtd html 4.01 frameset//",
    "-//w3c//dtd html 4.01 transitional//",
];

const LIMITED_QUIRKS_PUBLIC_ID_PREFIXES: &[&str] = &[
    "-//w3c//dtd xhtml 1.0 frameset//",
    "-//w3c//dtd xhtml 1.0 transitional//",
];

fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    haystack
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// The document mode a DOCTYPE token selects.
///
/// `public_id` and `system_id` are `None` when missing, which is not the
/// same as empty. Documents are never iframe srcdoc documents here, so the
/// "not an iframe srcdoc document" condition always holds.
///
/// ```
/// use sapling_dom::QuirksMode;
/// use sapling_html::parser::quirks::quirks_mode_for_doctype;
///
/// assert_eq!(quirks_mode_for_doctype(Some("html"), None, None, false), QuirksMode::NoQuirks);
/// assert_eq!(quirks_mode_for_doctype(None, None, None, false), QuirksMode::Quirks);
/// ```
#[must_use]
pub fn quirks_mode_for_doctype(
    name: Option<&str>,
    public_id: Option<&str>,
    system_id: Option<&str>,
    force_quirks: bool,
) -> QuirksMode {
    // "The force-quirks flag is set to on."
    // "The name is not "html"."
    if force_quirks || name != Some("html") {
        return QuirksMode::Quirks;
    }

    if let Some(public) = public_id {
        if QUIRKS_PUBLIC_IDS
            .iter()
            .any(|id| public.eq_ignore_ascii_case(id))
            || QUIRKS_PUBLIC_ID_PREFIXES
                .iter()
                .any(|prefix| starts_with_ignore_case(public, prefix))
        {
            return QuirksMode::Quirks;
        }
        // "The system identifier is missing and the public identifier starts
        // with: ..."
        if system_id.is_none()
            && HTML4_PUBLIC_ID_PREFIXES
                .iter()
                .any(|prefix| starts_with_ignore_case(public, prefix))
        {
            return QuirksMode::Quirks;
        }
    }

    // "The system identifier is set to: "http://www.ibm.com/data/dtd/v11/ibmxhtml1-transitional.dtd""
    if system_id.is_some_and(|system| system.eq_ignore_ascii_case(QUIRKS_SYSTEM_ID)) {
        return QuirksMode::Quirks;
    }

    if let Some(public) = public_id {
        // "Otherwise, if the document is not an iframe srcdoc document, and
        // the parser cannot change the mode flag is false, and the DOCTYPE
        // token matches one of the conditions in the following list, then
        // set the Document to limited-quirks mode"
        if LIMITED_QUIRKS_PUBLIC_ID_PREFIXES
            .iter()
            .any(|prefix| starts_with_ignore_case(public, prefix))
            || (system_id.is_some()
                && HTML4_PUBLIC_ID_PREFIXES
                    .iter()
                    .any(|prefix| starts_with_ignore_case(public, prefix)))
        {
            return QuirksMode::LimitedQuirks;
        }
    }

    QuirksMode::NoQuirks
}

/// Whether a DOCTYPE is a parse error: "If the DOCTYPE token's name is not
/// "html", or the token's public identifier is not missing, or the token's
/// system identifier is neither missing nor "about:legacy-compat", then
/// there is a parse error."
#[must_use]
pub fn is_nonconforming_doctype(
    name: Option<&str>,
    public_id: Option<&str>,
    system_id: Option<&str>,
) -> bool {
    name != Some("html")
        || public_id.is_some()
        || system_id.is_some_and(|system| system != "about:legacy-compat")
}
