#[cfg(test)]
pub(crate) mod completion_dsl;
#[cfg(test)]
mod test_entity_selector;
