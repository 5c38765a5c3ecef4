//! Bundled demo suite exercising the harness.

use jsunit::{Harness, HarnessResult, Value};
use tracing::info;

/// Adds all arguments after numeric coercion.
pub fn sum(args: &[Value]) -> f64 {
    args.iter().map(Value::to_number).sum()
}

/// Raises `base` to a non-negative integer `exponent`; NaN otherwise.
pub fn pow(base: f64, exponent: f64) -> f64 {
    if exponent < 0.0 || exponent.fract() != 0.0 {
        return f64::NAN;
    }
    base.powf(exponent)
}

/// Register and run the demo tests on `jsunit`.
pub fn register(jsunit: &mut Harness) -> HarnessResult<()> {
    jsunit.before_each(|index| {
        info!("Start test #{}", index);
        Ok(())
    });
    jsunit.after_each(|index| {
        info!("Finish test #{}", index);
        Ok(())
    });

    jsunit.module("NaN");
    jsunit.test("IsNaN Function", |assert| {
        assert.is_true(Value::NAN.coerces_to_nan(), "NaN parameter");
        assert.is_true(Value::from("5,6").coerces_to_nan(), "Convert joined list to number");
        assert.is_false(Value::from(f64::INFINITY).coerces_to_nan(), "Infinity is not NaN");
        Ok(())
    })?;

    jsunit.module("Sum");
    jsunit.test("Sum Function", |assert| {
        assert.equal(sum(&[4.into(), 5.into()]), 9, "Simple add");
        assert.equal(sum(&["5".into(), "6".into()]), 11, "Add string nums");
        assert.equal(sum(&["5".into(), 8.into()]), 13, "One string parameter");
        assert.equal(sum(&[5.into(), 6.into(), 8.into()]), 19, "Three arguments");
        assert.equal(sum(&[]), 0, "No arguments");
        assert.equal(sum(&["5".into(), 6.into(), "-2".into()]), 9, "Negative arguments");
        Ok(())
    })?;

    jsunit.module("Power");
    jsunit.test("Power function", |assert| {
        assert.equal(pow(2.0, 3.0), 8, "2**3 = 8");
        assert.equal(pow(3.0, 4.0), 81, "3**4 = 81");
        assert.is_nan(pow(2.0, -1.0), "NaN for negative exponents");
        assert.is_nan(pow(2.0, 1.5), "NaN for decimal exponents");
        Ok(())
    })?;

    Ok(())
}
