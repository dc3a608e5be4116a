//! Fixed prompt texts sent to the chat-completion service.

use truckscout_core::{ChatMessage, CompanyRecord};

/// Who the assistant is.
pub const ASSISTANT_ROLE: &str = "You are an assistant helping a sales representative at Mercedes Benz truck to help make truck sales to logistics companies.";

/// How outreach letters are written.
pub const LETTER_POLICY: &str = "If there is a request to create an outreach letter, create the letter in a professional way that it is tailored to the client using the information available in the client's profile and fleet information. Write the mail in German - communication with the user stays in english though. As an additional part of the mail, invite the customer to a test drive at the closest Mercedes Benz truck dealership.";

/// Dealership the letters invite customers to.
pub const NEAREST_DEALERSHIP: &str =
    "Closest Mercedes Benz truck dealership: Daimler Truck AG - Nutzfahrzeugzentrum Mercedes-Benz München";

/// Instruction for turning a letter into an HTML email body.
pub const HTML_FORMAT_INSTRUCTION: &str = "Create an html email file out of the input. Do not use headings, but bold text for sections if applicable. Do not modify the content at all (only leave out the subject title).";

/// The system messages that open every conversational request, in order.
pub fn system_preamble() -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(ASSISTANT_ROLE),
        ChatMessage::system(LETTER_POLICY),
        ChatMessage::system(NEAREST_DEALERSHIP),
    ]
}

/// System message describing the selected company.
pub fn company_context(record: &CompanyRecord) -> ChatMessage {
    ChatMessage::system(format!(
        "Potential client for Mercedes Benz truck: \n {}\n\n Fleet information: {}",
        record.company_summary, record.fleet_content
    ))
}
