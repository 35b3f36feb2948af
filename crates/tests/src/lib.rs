
#[cfg(test)]
mod assess_tests;
#[cfg(test)]
mod catalog_tests;
