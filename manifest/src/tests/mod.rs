#[cfg(test)]
pub(crate) mod common;
#[cfg(test)]
mod test_block_index;
#[cfg(test)]
mod test_properties;
