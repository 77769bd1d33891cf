use crate::{error::Error, Result};

/// Bounds-checked write into a dense matrix.
pub fn set_entry(matrix: &mut na::DMatrix<f64>, r: usize, c: usize, v: f64) -> Result<()> {
  let (nrows, ncols) = matrix.shape();
  if r >= nrows {
    return Err(Error::out_of_range("matrix row", r, nrows));
  }
  match matrix.get_mut((r, c)) {
    Some(entry) => {
      *entry = v;
      Ok(())
    }
    None => Err(Error::out_of_range("matrix column", c, ncols)),
  }
}

pub fn is_symmetric(matrix: &na::DMatrix<f64>) -> bool {
  matrix.is_square()
    && (0..matrix.nrows()).all(|i| (0..i).all(|j| matrix[(i, j)] == matrix[(j, i)]))
}

/// Renders `value` with at most `digits` significant digits, like C's `%g`.
///
/// Trailing zeros are dropped, so `1.0` becomes `1`.
pub fn format_significant(value: f64, digits: usize) -> String {
  if value == 0.0 {
    return "0".to_owned();
  }
  if !value.is_finite() {
    return value.to_string();
  }
  let digits = digits.max(1);

  let sci = format!("{:.*e}", digits - 1, value);
  let Some((mantissa, exponent)) = sci.split_once('e') else {
    return sci;
  };
  let Ok(exponent) = exponent.parse::<i32>() else {
    return sci;
  };

  if exponent < -5 || exponent >= digits as i32 {
    format!("{}e{exponent}", trim_fraction(mantissa))
  } else {
    let decimals = (digits as i32 - 1 - exponent) as usize;
    trim_fraction(&format!("{value:.decimals$}")).to_owned()
  }
}

fn trim_fraction(s: &str) -> &str {
  if s.contains('.') {
    s.trim_end_matches('0').trim_end_matches('.')
  } else {
    s
  }
}

pub fn assert_mat_eq(a: &na::DMatrix<f64>, b: &na::DMatrix<f64>) {
  const TOL: f64 = 10e-12;
  assert_eq!(a.shape(), b.shape(), "Matrix shapes differ.");
  let diff = a - b;
  let error = diff.norm();
  let equal = error <= TOL;
  if !equal {
    println!("Matrix a={a:.3}");
    println!("Matrix b={b:.3}");
    println!("a-b={diff:.3}");
    panic!("Matrices not equal.");
  }
}
