//! Quadrature rule tables on the reference triangle.
//!
//! Two families are available:
//! - [`QuadratureRule::Triangular`]: symmetric rules for orders
//!   [`TRIANGULAR_ORDERS`] (1, 6, 16, 25 and 33 points).
//! - [`QuadratureRule::Gaussian`]: collapsed Gauss–Legendre products for
//!   orders `1..=`[`MAX_GAUSSIAN_ORDER`] (`order²` points).
//!
//! Every rule is a fixed list of barycentric points with weights summing to
//! 1; [`lookup`] resolves a `(family, order)` pair or fails with
//! [`ConfigError::UnsupportedQuadrature`].

pub mod gaussian;
pub mod triangular;

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::mesh_error::ConfigError;

pub use gaussian::MAX_GAUSSIAN_ORDER;
pub use triangular::TRIANGULAR_ORDERS;

/// Quadrature rule family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuadratureRule {
    /// Fixed symmetric rules, orders {1, 4, 8, 10, 12}.
    Triangular,
    /// Collapsed Gauss–Legendre products, orders 1 through 10.
    Gaussian,
}

impl QuadratureRule {
    /// Lower-case configuration name.
    pub fn name(self) -> &'static str {
        match self {
            QuadratureRule::Triangular => "triangular",
            QuadratureRule::Gaussian => "gaussian",
        }
    }

    /// Returns `true` if `order` has a table in this family.
    pub fn supports(self, order: u32) -> bool {
        match self {
            QuadratureRule::Triangular => TRIANGULAR_ORDERS.contains(&order),
            QuadratureRule::Gaussian => (1..=MAX_GAUSSIAN_ORDER).contains(&order),
        }
    }
}

impl fmt::Display for QuadratureRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QuadratureRule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "triangular" => Ok(QuadratureRule::Triangular),
            "gaussian" => Ok(QuadratureRule::Gaussian),
            _ => Err(ConfigError::UnknownQuadratureRule(s.to_string())),
        }
    }
}

/// A `(family, order)` pair.
///
/// The default is the triangular family at order 4, which keeps full-sphere
/// meshes of typical resolution within about 1e-6 relative area error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuadratureConfig {
    #[serde(rename = "quadrature_rule")]
    pub rule: QuadratureRule,
    pub order: u32,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        Self {
            rule: QuadratureRule::Triangular,
            order: 4,
        }
    }
}

impl QuadratureConfig {
    /// Validated configuration.
    pub fn new(rule: QuadratureRule, order: u32) -> Result<Self, ConfigError> {
        let config = Self { rule, order };
        config.validate()?;
        Ok(config)
    }

    /// Check the pair against the supported tables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rule.supports(self.order) {
            Ok(())
        } else {
            Err(ConfigError::UnsupportedQuadrature {
                rule: self.rule.name(),
                order: self.order,
            })
        }
    }

    /// The rule's table.
    pub fn table(&self) -> Result<&'static TriangleRule, ConfigError> {
        lookup(self.rule, self.order)
    }
}

/// Barycentric sample points and weights for one `(family, order)` pair.
#[derive(Clone, Debug, PartialEq)]
pub struct TriangleRule {
    rule: QuadratureRule,
    order: u32,
    samples: Cow<'static, [([f64; 3], f64)]>,
}

impl TriangleRule {
    pub(crate) const fn borrowed(
        rule: QuadratureRule,
        order: u32,
        samples: &'static [([f64; 3], f64)],
    ) -> Self {
        Self {
            rule,
            order,
            samples: Cow::Borrowed(samples),
        }
    }

    pub(crate) fn owned(rule: QuadratureRule, order: u32, samples: Vec<([f64; 3], f64)>) -> Self {
        Self {
            rule,
            order,
            samples: Cow::Owned(samples),
        }
    }

    /// Family this table belongs to.
    #[inline]
    pub fn rule(&self) -> QuadratureRule {
        self.rule
    }

    /// Order within the family.
    #[inline]
    pub fn order(&self) -> u32 {
        self.order
    }

    /// `(barycentric point, weight)` pairs.
    #[inline]
    pub fn samples(&self) -> &[([f64; 3], f64)] {
        &self.samples
    }

    /// Sum of the weights (1 up to rounding).
    pub fn weight_sum(&self) -> f64 {
        self.samples.iter().map(|(_, w)| w).sum()
    }
}

static GAUSSIAN_RULES: Lazy<Vec<TriangleRule>> = Lazy::new(|| {
    (1..=MAX_GAUSSIAN_ORDER)
        .filter_map(gaussian::collapsed_rule)
        .collect()
});

/// Resolve the table for `(rule, order)`.
pub fn lookup(rule: QuadratureRule, order: u32) -> Result<&'static TriangleRule, ConfigError> {
    let found = match rule {
        QuadratureRule::Triangular => triangular::rule(order),
        QuadratureRule::Gaussian => GAUSSIAN_RULES.iter().find(|r| r.order() == order),
    };
    found.ok_or(ConfigError::UnsupportedQuadrature {
        rule: rule.name(),
        order,
    })
}
