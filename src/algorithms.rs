//! Useful algorithms.

pub(crate) mod generate;
pub(crate) mod mgf;
pub(crate) mod pad;
pub(crate) mod pkcs1v15;
pub(crate) mod prime;
pub(crate) mod rsa;
