//! CreateProduct input validation.
//!
//! Rules are an ordered list of predicate + violation pairs. Every rule runs,
//! violations accumulate in declaration order, and callers that surface a single
//! message report the first one.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::product::CreateProductCommand;

/// A single failed validation rule.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Violation {
    #[error("Name is required")]
    NameRequired,

    #[error("Category is required")]
    CategoryRequired,

    #[error("ImageFile is required")]
    ImageFileRequired,

    #[error("Price must be greater than 0")]
    PriceNotPositive,
}

struct Rule {
    holds: fn(&CreateProductCommand) -> bool,
    violation: Violation,
}

fn has_name(cmd: &CreateProductCommand) -> bool {
    !cmd.name.is_empty()
}

fn has_category(cmd: &CreateProductCommand) -> bool {
    !cmd.category.is_empty()
}

fn has_image_file(cmd: &CreateProductCommand) -> bool {
    !cmd.image_file.is_empty()
}

fn has_positive_price(cmd: &CreateProductCommand) -> bool {
    cmd.price > Decimal::ZERO
}

// Order matters: it decides which message wins when several rules fail.
const RULES: [Rule; 4] = [
    Rule {
        holds: has_name,
        violation: Violation::NameRequired,
    },
    Rule {
        holds: has_category,
        violation: Violation::CategoryRequired,
    },
    Rule {
        holds: has_image_file,
        violation: Violation::ImageFileRequired,
    },
    Rule {
        holds: has_positive_price,
        violation: Violation::PriceNotPositive,
    },
];

/// Check every rule against `command`; empty means valid.
pub fn validate(command: &CreateProductCommand) -> Vec<Violation> {
    RULES
        .iter()
        .filter(|rule| !(rule.holds)(command))
        .map(|rule| rule.violation)
        .collect()
}

/// A command that has passed every rule.
///
/// The only way to obtain one is [`ValidatedCreateProduct::new`], so holding one
/// is proof that validation ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCreateProduct(CreateProductCommand);

impl ValidatedCreateProduct {
    /// Validate `command`, failing with the first violated rule.
    pub fn new(command: CreateProductCommand) -> Result<Self, Violation> {
        match validate(&command).first() {
            Some(&violation) => Err(violation),
            None => Ok(Self(command)),
        }
    }

    pub fn command(&self) -> &CreateProductCommand {
        &self.0
    }

    pub fn into_inner(self) -> CreateProductCommand {
        self.0
    }
}
