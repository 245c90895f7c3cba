//! Built-in rules.

mod attr_lowercase;
mod attr_value_double_quotes;
mod doctype_first;
mod space_tab_mixed_disabled;
mod tag_pair;

pub use attr_lowercase::AttrLowercase;
pub use attr_value_double_quotes::AttrValueDoubleQuotes;
pub use doctype_first::DoctypeFirst;
pub use space_tab_mixed_disabled::SpaceTabMixedDisabled;
pub use tag_pair::TagPair;

use crate::rule::Rule;

/// One instance of every built-in rule, in registration order.
#[must_use]
pub fn builtin() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(DoctypeFirst),
        Box::new(TagPair),
        Box::new(AttrLowercase),
        Box::new(AttrValueDoubleQuotes),
        Box::new(SpaceTabMixedDisabled),
    ]
}
