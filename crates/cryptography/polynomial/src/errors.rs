/// Errors that can occur while building a [`Domain`](crate::domain::Domain) or
/// running a transform over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested size, or the length of the input, does not fit the domain.
    DomainSize(DomainSizeError),
    /// A decimation mode was requested that has no implementation.
    ///
    /// This is raised when decoding a [`Decimation`](crate::Decimation) from
    /// its `u8` discriminant.
    UnsupportedDecimation {
        /// The discriminant that was supplied.
        discriminant: u8,
    },
}

/// Reasons a size is rejected by a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainSizeError {
    /// Domains are subgroups of roots of unity, so their size must be a
    /// non-zero power of two.
    NotPowerOfTwo {
        /// The size that was requested.
        size: usize,
    },

    /// The field has no root of unity of the requested order.
    ///
    /// `log_size` must be at most the two-adicity of the scalar field.
    ExceedsTwoAdicity {
        /// log2 of the requested size.
        log_size: u32,
        /// The largest supported log2 size.
        two_adicity: u32,
    },

    /// The sequence handed to a transform does not have the length of the domain.
    ///
    /// Inputs are never silently padded or truncated by `transform`; the
    /// `*_scalars` helpers pad shorter inputs but still reject longer ones.
    LengthMismatch {
        /// Length of the supplied sequence.
        got: usize,
        /// Size of the domain.
        expected: usize,
    },
}

impl From<DomainSizeError> for Error {
    fn from(value: DomainSizeError) -> Self {
        Self::DomainSize(value)
    }
}
