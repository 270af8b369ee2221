//! Fixed informational replies.

use crate::context::ConversationContext;
use crate::handlers::HandlerRequest;

pub const GREETING_REPLY: &str = "Hello! Welcome to our shop. I can tell you about prices, \
stock, and our product categories. What are you looking for today?";

pub const HELP_REPLY: &str = "Here is what you can ask me:\n\
• \"How much is the shirt?\" for prices\n\
• \"Is the lamp in stock?\" for availability\n\
• \"Show me shirts\" to search for products\n\
• \"Show me electronics\" to browse a category\n\
• \"Products under 50 euros\" or \"between 10 and 30\" to filter by price\n\
• \"What are the cheapest products?\" or \"What is the most expensive item?\"";

pub const UNKNOWN_REPLY: &str = "Sorry, I didn't quite understand that. You can ask me about \
prices or stock of a product, search for products, browse a category, or type \"help\" for examples.";

pub fn greeting(_request: &HandlerRequest<'_>, _context: &mut ConversationContext) -> String {
    GREETING_REPLY.to_string()
}

pub fn help(_request: &HandlerRequest<'_>, _context: &mut ConversationContext) -> String {
    HELP_REPLY.to_string()
}

pub fn unknown(_request: &HandlerRequest<'_>, _context: &mut ConversationContext) -> String {
    UNKNOWN_REPLY.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    use shopbot_core::ChatConfig;

    #[test]
    fn test_fixed_replies_ignore_input() {
        let config = ChatConfig::default();
        let mut ctx = ConversationContext::default();
        let a = HandlerRequest::new("hello", &[], &config);
        let b = HandlerRequest::new("something else entirely", &[], &config);
        assert_eq!(greeting(&a, &mut ctx), greeting(&b, &mut ctx));
        assert_eq!(help(&a, &mut ctx), HELP_REPLY);
        assert_eq!(unknown(&b, &mut ctx), UNKNOWN_REPLY);
        assert!(ctx.last_intent().is_none());
    }

    #[test]
    fn test_greeting_says_hello() {
        assert!(GREETING_REPLY.starts_with("Hello"));
    }
}
