// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Full-precision multiply-divide for Q-format fixed point arithmetic.

use alloy_primitives::{U160, U256, U512};

/// 2^96, the scale of a Q64.96 fixed point number.
pub const Q96: U256 = U256::from_limbs([0, 1 << 32, 0, 0]);

/// 2^96 as a sqrt price ratio, i.e. a price of exactly 1.
pub const Q96_U160: U160 = U160::from_limbs([0, 1 << 32, 0]);

/// 2^128, the scale of a Q128.128 fee growth accumulator.
pub const Q128: U256 = U256::from_limbs([0, 0, 1, 0]);

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullMathError {
    #[error("Division by zero in mul_div")]
    DivisionByZero,
    #[error("Result of mul_div does not fit in 256 bits")]
    Overflow,
}

/// Multiplication and division helpers which never truncate the intermediate product.
#[derive(Debug)]
pub struct FullMath;

impl FullMath {
    /// Calculates `floor(a * b / denominator)` with a 512-bit intermediate product.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `denominator` is zero.
    /// - The quotient does not fit in 256 bits.
    pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, FullMathError> {
        if denominator.is_zero() {
            return Err(FullMathError::DivisionByZero);
        }

        // Fast path, the product fits in 256 bits
        if let Some(product) = a.checked_mul(b) {
            return Ok(product / denominator);
        }

        let product = U512::from(a) * U512::from(b);
        let quotient = product / U512::from(denominator);
        if quotient > U512::from(U256::MAX) {
            return Err(FullMathError::Overflow);
        }

        Ok(U256::from(quotient))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
