use serde::{Serialize, Deserialize};

/// The catalogue of activation functions a neuron can apply to its net value.
///
/// Variants are plain values, so one activation can be shared by any number
/// of neurons without reference counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivationFunction {
    ReLU,
    Softplus,
    Step,
    Sigmoid,
    #[serde(alias = "Identity")]
    Linear,
}

impl ActivationFunction {
    pub const ALL: [ActivationFunction; 5] = [
        ActivationFunction::ReLU,
        ActivationFunction::Softplus,
        ActivationFunction::Step,
        ActivationFunction::Sigmoid,
        ActivationFunction::Linear,
    ];

    /// Evaluates the function at `net`, or its derivative when
    /// `want_derivative` is set.
    pub fn evaluate(&self, net: f64, want_derivative: bool) -> f64 {
        if want_derivative {
            self.derivative(net)
        } else {
            self.function(net)
        }
    }

    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::ReLU => if x >= 0.0 { x } else { 0.0 },
            // ln(1 + e^x), rearranged so large |x| neither overflows nor loses precision.
            ActivationFunction::Softplus => x.max(0.0) + (-x.abs()).exp().ln_1p(),
            ActivationFunction::Step => if x >= 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Sigmoid => sigmoid(x),
            ActivationFunction::Linear => x,
        }
    }

    /// Element-wise derivative. `Step` has no useful derivative and reports
    /// zero everywhere.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::ReLU => if x >= 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Softplus => sigmoid(x),
            ActivationFunction::Step => 0.0,
            ActivationFunction::Sigmoid => {
                let fx = sigmoid(x);
                fx * (1.0 - fx)
            }
            ActivationFunction::Linear => 1.0,
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn relu_clamps_negatives() {
        let relu = ActivationFunction::ReLU;
        assert_eq!(relu.evaluate(-3.0, false), 0.0);
        assert_eq!(relu.evaluate(3.0, false), 3.0);
        assert_eq!(relu.evaluate(-3.0, true), 0.0);
        assert_eq!(relu.evaluate(3.0, true), 1.0);
        assert_eq!(relu.evaluate(0.0, true), 1.0);
    }

    #[test]
    fn sigmoid_is_centered_at_half() {
        let sig = ActivationFunction::Sigmoid;
        assert_eq!(sig.evaluate(0.0, false), 0.5);
        assert_eq!(sig.evaluate(0.0, true), 0.25);
    }

    #[test]
    fn sigmoid_derivative_matches_symmetric_form() {
        let sig = ActivationFunction::Sigmoid;
        for &x in &[-6.0, -1.5, -0.1, 0.7, 2.0, 9.0] {
            let expected = sig.function(x) * sig.function(-x);
            assert_abs_diff_eq!(sig.derivative(x), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn softplus_matches_naive_formula() {
        let sp = ActivationFunction::Softplus;
        for &x in &[-4.0, -0.5, 0.0, 0.5, 4.0] {
            assert_abs_diff_eq!(sp.function(x), (1.0 + f64::exp(x)).ln(), epsilon = 1e-12);
        }
        assert_abs_diff_eq!(sp.derivative(0.0), 0.5, epsilon = 1e-12);
        // Naive ln(1 + e^x) overflows to infinity here.
        assert_abs_diff_eq!(sp.function(1000.0), 1000.0, epsilon = 1e-9);
        assert_eq!(sp.function(-1000.0), 0.0);
    }

    #[test]
    fn step_has_zero_derivative() {
        let step = ActivationFunction::Step;
        assert_eq!(step.evaluate(0.0, false), 1.0);
        assert_eq!(step.evaluate(-0.01, false), 0.0);
        assert_eq!(step.evaluate(5.0, true), 0.0);
        assert_eq!(step.evaluate(-5.0, true), 0.0);
    }

    #[test]
    fn linear_passes_through() {
        let lin = ActivationFunction::Linear;
        assert_eq!(lin.evaluate(-2.25, false), -2.25);
        assert_eq!(lin.evaluate(-2.25, true), 1.0);
    }

    #[test]
    fn identity_alias_deserializes_to_linear() {
        let parsed: ActivationFunction = serde_json::from_str("\"Identity\"").unwrap();
        assert_eq!(parsed, ActivationFunction::Linear);
        let json = serde_json::to_string(&ActivationFunction::ReLU).unwrap();
        assert_eq!(json, "\"ReLU\"");
    }
}
