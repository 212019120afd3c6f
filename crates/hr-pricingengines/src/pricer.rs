//! The `Pricer` trait shared by every heat rate call engine.

use hr_core::{Batch, Result};
use hr_instruments::PricingContext;
use std::sync::Arc;

/// Prices heat rate calls from a validated context.
///
/// The result has the context's shape: a scalar context yields
/// [`Batch::Scalar`], a strip yields one price per entry.
pub trait Pricer: std::fmt::Debug + Send + Sync {
    /// Discounted price per unit of notional.
    fn price(&self, ctx: &PricingContext) -> Result<Batch>;

    /// Short identifier recorded alongside stored results.
    fn name(&self) -> &str;
}

impl<P: Pricer + ?Sized> Pricer for &P {
    fn price(&self, ctx: &PricingContext) -> Result<Batch> {
        (**self).price(ctx)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<P: Pricer + ?Sized> Pricer for Box<P> {
    fn price(&self, ctx: &PricingContext) -> Result<Batch> {
        (**self).price(ctx)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<P: Pricer + ?Sized> Pricer for Arc<P> {
    fn price(&self, ctx: &PricingContext) -> Result<Batch> {
        (**self).price(ctx)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
