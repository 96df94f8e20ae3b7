use crate::css::transform::{ComputedTransform, parse_computed};
use crate::foundation::core::{Affine, Vec2};
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::host::{LayoutHost, ensure_attached};

const EPS: f64 = 1e-9;

/// How faithfully the decomposition describes the source matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fidelity {
    /// Translate, scale and rotation reproduce the matrix.
    #[default]
    Exact,
    /// The 2D matrix carries shear; components drop it but the matrix is still exact.
    Skewed,
    /// A `matrix3d` with perspective; only the translation is reliable.
    Projected,
}

/// A decomposed 2D transform as read from computed style.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AffineTransform2D {
    /// Horizontal translation (px).
    pub tx: f64,
    /// Vertical translation (px).
    pub ty: f64,
    /// Scale along the rotated x axis.
    pub scale_x: f64,
    /// Scale along the rotated y axis (negative when the matrix mirrors).
    pub scale_y: f64,
    /// Rotation in radians, clockwise on screen.
    pub angle: f64,
    /// Decomposition quality.
    pub fidelity: Fidelity,
    matrix: Affine,
}

impl Default for AffineTransform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform2D {
    /// No transform.
    pub const IDENTITY: Self = Self {
        tx: 0.0,
        ty: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
        angle: 0.0,
        fidelity: Fidelity::Exact,
        matrix: Affine::IDENTITY,
    };

    /// Decompose a 2D matrix into translate, scale and rotation.
    pub fn from_affine(m: Affine) -> Self {
        let [a, b, c, d, e, f] = m.as_coeffs();
        let scale_x = a.hypot(b);
        let (scale_x, scale_y, angle) = if scale_x > EPS {
            (scale_x, (a * d - b * c) / scale_x, b.atan2(a))
        } else {
            (0.0, c.hypot(d), 0.0)
        };
        let fidelity = if (a * c + b * d).abs() > EPS {
            Fidelity::Skewed
        } else {
            Fidelity::Exact
        };
        Self {
            tx: e,
            ty: f,
            scale_x,
            scale_y,
            angle,
            fidelity,
            matrix: m,
        }
    }

    /// Decompose a CSS column-major `matrix3d`.
    ///
    /// Without perspective terms the element stays planar and its 2D projection is an exact
    /// affine map. With perspective only the translation survives.
    pub fn from_matrix3d(m: [f64; 16]) -> Self {
        let w = m[15];
        let has_perspective = m[3].abs() > EPS || m[7].abs() > EPS || w.abs() <= EPS;
        if has_perspective {
            let (tx, ty) = if w.abs() > EPS {
                (m[12] / w, m[13] / w)
            } else {
                (m[12], m[13])
            };
            return Self {
                fidelity: Fidelity::Projected,
                ..Self::translation(Vec2::new(tx, ty))
            };
        }
        Self::from_affine(Affine::new([
            m[0] / w,
            m[1] / w,
            m[4] / w,
            m[5] / w,
            m[12] / w,
            m[13] / w,
        ]))
    }

    /// Pure translation.
    pub fn translation(v: Vec2) -> Self {
        Self {
            tx: v.x,
            ty: v.y,
            matrix: Affine::translate(v),
            ..Self::IDENTITY
        }
    }

    /// Parse a serialized computed transform (`none`, `matrix(...)`, `matrix3d(...)`).
    pub fn parse(s: &str) -> SpriteResult<Self> {
        Ok(match parse_computed(s)? {
            ComputedTransform::None => Self::IDENTITY,
            ComputedTransform::Matrix(m) => Self::from_affine(m),
            ComputedTransform::Matrix3d(m) => Self::from_matrix3d(m),
        })
    }

    /// The source matrix (for [`Fidelity::Projected`], its translation only).
    pub fn matrix(&self) -> Affine {
        self.matrix
    }

    /// Matrix the lock uses when compensating for this transform.
    pub fn compensation_matrix(&self) -> Affine {
        match self.fidelity {
            Fidelity::Exact | Fidelity::Skewed => self.matrix,
            Fidelity::Projected => Affine::translate(Vec2::new(self.tx, self.ty)),
        }
    }

    /// Translation component.
    pub fn translate(&self) -> Vec2 {
        Vec2::new(self.tx, self.ty)
    }

    /// `true` for the identity transform.
    pub fn is_identity(&self) -> bool {
        let [a, b, c, d, e, f] = self.matrix.as_coeffs();
        (a - 1.0).abs() <= EPS
            && b.abs() <= EPS
            && c.abs() <= EPS
            && (d - 1.0).abs() <= EPS
            && e.abs() <= EPS
            && f.abs() <= EPS
    }

    /// Fail unless translate/scale/rotation fully describe the transform.
    pub fn require_exact(&self) -> SpriteResult<()> {
        match self.fidelity {
            Fidelity::Exact => Ok(()),
            Fidelity::Skewed => Err(SpriteError::unsupported_transform(
                "matrix has a skew component",
            )),
            Fidelity::Projected => Err(SpriteError::unsupported_transform(
                "matrix3d has perspective components",
            )),
        }
    }
}

/// Read an element's currently applied transform without touching its style.
pub fn read_transform<H: LayoutHost>(
    host: &mut H,
    node: H::Node,
) -> SpriteResult<AffineTransform2D> {
    ensure_attached(host, node)?;
    let style = host.computed_style(node)?;
    let t = AffineTransform2D::parse(&style.transform)?;
    if t.fidelity != Fidelity::Exact {
        tracing::warn!(
            ?node,
            transform = %style.transform,
            fidelity = ?t.fidelity,
            "transform decomposition is approximate"
        );
    }
    Ok(t)
}

#[cfg(test)]
#[path = "../../tests/unit/engine/transform.rs"]
mod tests;
