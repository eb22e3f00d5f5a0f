//! Identifier quoting

use crate::facts::ConnectionFacts;
use dbcontents_core::{fold_identifier, quote_h2_identifier};

impl ConnectionFacts {
    /// Write `identifier` the way a query against this connection needs it.
    ///
    /// Plain H2 quotes every identifier. Everything else, H2 in MySQL mode
    /// included, gets the upper-cased form an unquoted identifier folds to.
    pub fn quote_identifier(&self, identifier: Option<&str>) -> Option<String> {
        let identifier = identifier?;
        if self.is_h2() && !self.is_h2_mode_mysql() {
            Some(quote_h2_identifier(identifier))
        } else {
            Some(fold_identifier(identifier))
        }
    }
}
