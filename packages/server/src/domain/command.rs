//! Chat commands embedded in message text.

/// Token that starts a stock quote request.
pub const STOCK_COMMAND: &str = "/stock";

/// A command recognized in a message's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/stock=<SYMBOL>`: look up a quote for `symbol`.
    StockQuote { symbol: String },
}

impl Command {
    /// Recognize a command in `text`.
    ///
    /// The whole text is split on `=`; it matches only when that yields
    /// exactly two parts and the first is the command token. The symbol is
    /// passed on as-is, even when empty.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.split('=');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(STOCK_COMMAND), Some(symbol), None) => Some(Self::StockQuote {
                symbol: symbol.to_string(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock(symbol: &str) -> Option<Command> {
        Some(Command::StockQuote {
            symbol: symbol.to_string(),
        })
    }

    #[test]
    fn test_parse_stock_command() {
        // テスト項目: "/stock=AAPL.US" はコマンドとして認識される
        assert_eq!(Command::parse("/stock=AAPL.US"), stock("AAPL.US"));
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        // テスト項目: "=" がない場合はコマンドではない
        assert_eq!(Command::parse("/stock"), None);
    }

    #[test]
    fn test_parse_rejects_wrong_token() {
        // テスト項目: トークンが "/stock" でない場合はコマンドではない
        assert_eq!(Command::parse("stock=AAPL.US"), None);
        assert_eq!(Command::parse("/STOCK=AAPL.US"), None);
        assert_eq!(Command::parse(" /stock=AAPL.US"), None);
    }

    #[test]
    fn test_parse_rejects_extra_separators() {
        // テスト項目: 3 つ以上に分割される場合はコマンドではない
        assert_eq!(Command::parse("/stock=AAPL.US=x"), None);
    }

    #[test]
    fn test_parse_accepts_empty_symbol() {
        // テスト項目: シンボルが空でも分割数が 2 ならコマンドとして扱う
        assert_eq!(Command::parse("/stock="), stock(""));
    }

    #[test]
    fn test_parse_plain_text() {
        // テスト項目: 通常のメッセージはコマンドではない
        assert_eq!(Command::parse("hello everyone"), None);
        assert_eq!(Command::parse(""), None);
    }
}
