//! CSS transform text: authored function lists and computed `matrix()` values.

use cssparser::Parser;
use smallvec::SmallVec;

use crate::css::syntax::{CssError, Numeric, numeric, parse_all};
use crate::css::value::format_number;
use crate::foundation::core::{Affine, Vec2};
use crate::foundation::error::{SpriteError, SpriteResult};

/// One parsed transform function. Angles are radians, lengths are px.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformFn {
    /// `translate`, `translateX`, `translateY`
    Translate(Vec2),
    /// `scale`, `scaleX`, `scaleY`
    Scale(f64, f64),
    /// `rotate`
    Rotate(f64),
    /// `skewX`, `skewY`, `skew`
    Skew(f64, f64),
    /// `matrix(a, b, c, d, e, f)`
    Matrix(Affine),
}

impl TransformFn {
    /// Matrix form of this function.
    pub fn to_affine(self) -> Affine {
        match self {
            Self::Translate(v) => Affine::translate(v),
            Self::Scale(sx, sy) => Affine::scale_non_uniform(sx, sy),
            Self::Rotate(rad) => Affine::rotate(rad),
            Self::Skew(ax, ay) => Affine::new([1.0, ay.tan(), ax.tan(), 1.0, 0.0, 0.0]),
            Self::Matrix(m) => m,
        }
    }
}

/// An authored `transform` value. Empty means `none`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransformList {
    fns: SmallVec<[TransformFn; 4]>,
}

impl TransformList {
    /// Parse `none` or a whitespace-separated list of transform functions.
    pub fn parse(s: &str) -> SpriteResult<Self> {
        parse_all(s, "a transform list", |p| {
            if p.try_parse(|p| p.expect_ident_matching("none")).is_ok() {
                return Ok(Self::default());
            }
            let mut fns = SmallVec::new();
            while !p.is_exhausted() {
                fns.push(transform_function(p)?);
            }
            if fns.is_empty() {
                return Err(p.new_custom_error(SpriteError::style("empty transform value")));
            }
            Ok(Self { fns })
        })
    }

    /// `true` when the value is `none`.
    pub fn is_none(&self) -> bool {
        self.fns.is_empty()
    }

    /// Parsed functions in source order.
    pub fn functions(&self) -> &[TransformFn] {
        &self.fns
    }

    /// Combined matrix. Functions apply right-to-left, as in CSS.
    pub fn to_affine(&self) -> Affine {
        self.fns
            .iter()
            .fold(Affine::IDENTITY, |acc, f| acc * f.to_affine())
    }
}

/// A computed-style `transform` value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ComputedTransform {
    /// No transform applied.
    None,
    /// 2D matrix.
    Matrix(Affine),
    /// 4x4 matrix in CSS column-major order.
    Matrix3d([f64; 16]),
}

/// Parse the serialized computed form: `none`, `matrix(...)` or `matrix3d(...)`.
pub fn parse_computed(s: &str) -> SpriteResult<ComputedTransform> {
    parse_all(s, "a single computed matrix", |p| {
        if p.is_exhausted() || p.try_parse(|p| p.expect_ident_matching("none")).is_ok() {
            return Ok(ComputedTransform::None);
        }
        let name = p.expect_function()?.to_ascii_lowercase();
        p.parse_nested_block(|args| {
            let values = args.parse_comma_separated(numeric)?;
            computed_matrix(&name, &values).map_err(|e| args.new_custom_error(e))
        })
    })
}

fn computed_matrix(name: &str, args: &[Numeric]) -> SpriteResult<ComputedTransform> {
    match name {
        "matrix" => Ok(ComputedTransform::Matrix(matrix_args(args)?)),
        "matrix3d" => {
            let nums = numbers(args)?;
            let m: [f64; 16] = nums.as_slice().try_into().map_err(|_| {
                SpriteError::style(format!("matrix3d takes 16 numbers, got {}", nums.len()))
            })?;
            Ok(ComputedTransform::Matrix3d(m))
        }
        other => Err(SpriteError::style(format!(
            "computed transform must be matrix or matrix3d, got '{other}'"
        ))),
    }
}

/// Serialize a 2D matrix the way computed style does.
pub fn serialize_matrix(m: Affine) -> String {
    let c = m.as_coeffs();
    format!(
        "matrix({}, {}, {}, {}, {}, {})",
        format_number(c[0]),
        format_number(c[1]),
        format_number(c[2]),
        format_number(c[3]),
        format_number(c[4]),
        format_number(c[5]),
    )
}

fn transform_function<'i>(p: &mut Parser<'i, '_>) -> Result<TransformFn, CssError<'i>> {
    let name = p.expect_function()?.to_ascii_lowercase();
    p.parse_nested_block(|args| {
        let values = args.parse_comma_separated(numeric)?;
        function_from_args(&name, &values).map_err(|e| args.new_custom_error(e))
    })
}

fn length(arg: &Numeric) -> SpriteResult<f64> {
    match arg {
        Numeric::Number(v) => Ok(*v),
        Numeric::Dimension(v, unit) if unit == "px" => Ok(*v),
        other => Err(SpriteError::style(format!(
            "unsupported transform length {other:?}"
        ))),
    }
}

fn angle(arg: &Numeric) -> SpriteResult<f64> {
    match arg {
        Numeric::Dimension(v, unit) => match unit.as_str() {
            "deg" => Ok(v.to_radians()),
            "rad" => Ok(*v),
            "turn" => Ok(v * std::f64::consts::TAU),
            "grad" => Ok(v * std::f64::consts::PI / 200.0),
            other => Err(SpriteError::style(format!("unsupported angle unit '{other}'"))),
        },
        Numeric::Number(v) if *v == 0.0 => Ok(0.0),
        other => Err(SpriteError::style(format!("expected an angle, got {other:?}"))),
    }
}

fn number(arg: &Numeric) -> SpriteResult<f64> {
    match arg {
        Numeric::Number(v) => Ok(*v),
        other => Err(SpriteError::style(format!(
            "expected a plain number, got {other:?}"
        ))),
    }
}

fn numbers(args: &[Numeric]) -> SpriteResult<Vec<f64>> {
    args.iter().map(number).collect()
}

fn matrix_args(args: &[Numeric]) -> SpriteResult<Affine> {
    let nums = numbers(args)?;
    let c: [f64; 6] = nums.as_slice().try_into().map_err(|_| {
        SpriteError::style(format!("matrix takes 6 numbers, got {}", nums.len()))
    })?;
    Ok(Affine::new(c))
}

fn function_from_args(name: &str, args: &[Numeric]) -> SpriteResult<TransformFn> {
    let arity = |min: usize, max: usize| -> SpriteResult<()> {
        if args.len() < min || args.len() > max {
            return Err(SpriteError::style(format!(
                "{name}() takes {min}..={max} arguments, got {}",
                args.len()
            )));
        }
        Ok(())
    };
    match name {
        "translate" => {
            arity(1, 2)?;
            let x = length(&args[0])?;
            let y = args.get(1).map(length).transpose()?.unwrap_or(0.0);
            Ok(TransformFn::Translate(Vec2::new(x, y)))
        }
        "translatex" => {
            arity(1, 1)?;
            Ok(TransformFn::Translate(Vec2::new(length(&args[0])?, 0.0)))
        }
        "translatey" => {
            arity(1, 1)?;
            Ok(TransformFn::Translate(Vec2::new(0.0, length(&args[0])?)))
        }
        "scale" => {
            arity(1, 2)?;
            let sx = number(&args[0])?;
            let sy = args.get(1).map(number).transpose()?.unwrap_or(sx);
            Ok(TransformFn::Scale(sx, sy))
        }
        "scalex" => {
            arity(1, 1)?;
            Ok(TransformFn::Scale(number(&args[0])?, 1.0))
        }
        "scaley" => {
            arity(1, 1)?;
            Ok(TransformFn::Scale(1.0, number(&args[0])?))
        }
        "rotate" => {
            arity(1, 1)?;
            Ok(TransformFn::Rotate(angle(&args[0])?))
        }
        "skew" => {
            arity(1, 2)?;
            let ax = angle(&args[0])?;
            let ay = args.get(1).map(angle).transpose()?.unwrap_or(0.0);
            Ok(TransformFn::Skew(ax, ay))
        }
        "skewx" => {
            arity(1, 1)?;
            Ok(TransformFn::Skew(angle(&args[0])?, 0.0))
        }
        "skewy" => {
            arity(1, 1)?;
            Ok(TransformFn::Skew(0.0, angle(&args[0])?))
        }
        "matrix" => Ok(TransformFn::Matrix(matrix_args(args)?)),
        other => Err(SpriteError::style(format!(
            "unsupported transform function '{other}'"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/css/transform.rs"]
mod tests;
