//! MathML name fix-ups.

use crate::tokenizer::Attribute;

/// [§ 13.2.6.3 Adjust MathML attributes](https://html.spec.whatwg.org/multipage/parsing.html#adjust-mathml-attributes)
///
/// "When the steps below require the user agent to adjust MathML attributes
/// for a token, then, if the token has an attribute named definitionurl,
/// change its name to definitionURL (note the case difference)."
pub fn adjust_mathml_attributes(attributes: &mut [Attribute]) {
    for attr in attributes.iter_mut() {
        if attr.name == "definitionurl" {
            attr.name = String::from("definitionURL");
        }
    }
}
