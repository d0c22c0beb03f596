use crate::parser::core::{HTMLParser, InsertionMode, Step};
use crate::parser::error::ParseError;
use crate::tokenizer::Token;

impl HTMLParser {
    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    pub(crate) fn handle_in_template_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A character token", "A comment token", "A DOCTYPE token"
            // "Process the token using the rules for the "in body" insertion mode."
            Token::Character { .. } | Token::Comment { .. } | Token::Doctype { .. } => {
                self.handle_in_body_mode(token)
            }

            Token::StartTag { name, .. } => {
                // "Pop the current template insertion mode off the stack of
                // template insertion modes. Push "..." onto the stack of
                // template insertion modes so that it is the new current
                // template insertion mode. Switch the insertion mode to "...",
                // and reprocess the token."
                let mode = match name.as_str() {
                    "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script"
                    | "style" | "template" | "title" => return self.handle_in_head_mode(token),
                    "caption" | "colgroup" | "tbody" | "tfoot" | "thead" => InsertionMode::InTable,
                    "col" => InsertionMode::InColumnGroup,
                    "tr" => InsertionMode::InTableBody,
                    "td" | "th" => InsertionMode::InRow,
                    _ => InsertionMode::InBody,
                };
                let _ = self.template_insertion_modes.pop();
                self.template_insertion_modes.push(mode);
                Step::Reprocess(mode)
            }

            Token::EndTag { name } if name == "template" => self.handle_in_head_mode(token),

            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag { .. } => {
                self.unexpected(token);
                Step::Done
            }

            // "An end-of-file token"
            Token::EndOfFile => {
                // "If there is no template element on the stack of open
                // elements, then stop parsing. (fragment case)"
                if !self.open_elements.contains_html("template") {
                    self.stop_parsing();
                    return Step::Done;
                }
                // "Otherwise, this is a parse error. Pop elements from the
                // stack of open elements until a template element has been
                // popped from the stack. Clear the list of active formatting
                // elements up to the last marker. Pop the current template
                // insertion mode off the stack of template insertion modes.
                // Reset the insertion mode appropriately. Reprocess the token."
                self.parse_error(ParseError::EofWithOpenElement("template".to_owned()));
                self.open_elements.pop_until_html_named("template");
                self.active_formatting.clear_up_to_last_marker();
                let _ = self.template_insertion_modes.pop();
                self.reset_insertion_mode_appropriately();
                Step::Reprocess(self.insertion_mode)
            }
        }
    }
}
