use log::debug;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::codec::Codec;
use super::error::WiringError;

/// Name to codec bindings consulted by the ORM when converting a column
#[derive(Debug, Default, Clone)]
pub struct TypeRegistry {
    types: BTreeMap<String, Arc<dyn Codec>>,
}

impl TypeRegistry {
    pub fn new() -> TypeRegistry {
        TypeRegistry::default()
    }

    /// Bind `name` to `codec`
    ///
    /// Binding a name again to the very same codec instance is accepted, any other codec is an error.
    pub fn register(&mut self, name: &str, codec: Arc<dyn Codec>) -> Result<(), WiringError> {
        if let Some(existing) = self.types.get(name) {
            if same_codec(existing, &codec) {
                return Ok(());
            }
            return Err(WiringError::AlreadyBound { name: name.into() });
        }

        debug!("registering type {:?} with codec {:?}", name, codec);
        self.types.insert(name.into(), codec);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Codec>> {
        self.types.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}

fn same_codec(a: &Arc<dyn Codec>, b: &Arc<dyn Codec>) -> bool {
    // compare data pointers only, vtable pointers may differ between codegen units
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::date_codec::DateCodec;
    use crate::model::date_time_codec::DateTimeCodec;
    use itertools::Itertools;
    use pretty_assertions::assert_eq;

    #[test]
    fn registers_and_looks_up_codecs() {
        let mut types = TypeRegistry::new();
        types.register("datetime", Arc::new(DateTimeCodec)).unwrap();
        types.register("date", Arc::new(DateCodec)).unwrap();

        assert_eq!(types.get("datetime").map(|c| c.name()), Some("datetime"));
        assert_eq!(types.get("date").map(|c| c.name()), Some("date"));
        assert!(types.get("time").is_none());
        assert_eq!(types.names().collect_vec(), vec!["date", "datetime"]);
    }

    #[test]
    fn rebinding_the_same_codec_is_accepted() {
        let codec: Arc<dyn Codec> = Arc::new(DateTimeCodec);
        let mut types = TypeRegistry::new();

        types.register("datetime", codec.clone()).unwrap();
        types.register("datetimetz", codec.clone()).unwrap();
        types.register("datetime", codec).unwrap();

        assert!(types.contains("datetimetz"));
    }

    #[test]
    fn rebinding_another_codec_fails() {
        let mut types = TypeRegistry::new();
        types.register("datetime", Arc::new(DateTimeCodec)).unwrap();

        let err = types
            .register("datetime", Arc::new(DateTimeCodec))
            .unwrap_err();
        assert_eq!(err, WiringError::AlreadyBound { name: "datetime".into() });
    }
}
