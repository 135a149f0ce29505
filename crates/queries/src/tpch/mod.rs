//! One module per TPC-H query. Each exposes `build(cache, params)`.
pub(crate) mod q01;
pub(crate) mod q02;
pub(crate) mod q03;
pub(crate) mod q04;
pub(crate) mod q05;
pub(crate) mod q06;
pub(crate) mod q07;
pub(crate) mod q08;
pub(crate) mod q09;
pub(crate) mod q10;
pub(crate) mod q11;
pub(crate) mod q12;
pub(crate) mod q13;
pub(crate) mod q14;
pub(crate) mod q15;
pub(crate) mod q16;
pub(crate) mod q17;
pub(crate) mod q18;
pub(crate) mod q19;
pub(crate) mod q20;
pub(crate) mod q21;
pub(crate) mod q22;
