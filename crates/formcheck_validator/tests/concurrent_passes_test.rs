//! Concurrent validation passes against a shared resolver.
//!
//! A resolver holds only its compiled schema, so passes on different threads
//! must each see exactly the result a single-threaded pass would produce.

use formcheck_core::{
    FieldBuilder, FormData, ListBuilder, Record, RecordList, SchemaBuilder, ValidationOptions,
};
use formcheck_validator::ValidationResolver;
use pretty_assertions::assert_eq;
use std::thread;

fn snapshot(seed: usize) -> FormData {
    let records: RecordList = (0..50)
        .map(|i| {
            let name = match (i + seed) % 7 {
                0 => None,
                k => Some(format!("name-{}", (i * k + seed) % 13)),
            };
            Record::new().with("firstName", name)
        })
        .collect();
    FormData::new().with_list("test", records)
}

#[test]
fn test_parallel_passes_match_sequential_passes() {
    let schema = SchemaBuilder::new("people")
        .list(
            ListBuilder::new("test")
                .field(FieldBuilder::new("firstName").required_default().build())
                .unique("firstName")
                .build(),
        )
        .build();
    let resolver = ValidationResolver::new(&schema).unwrap();
    let options = ValidationOptions::new().with_collect_all_criteria(true);

    let snapshots: Vec<FormData> = (0..8).map(snapshot).collect();
    let sequential: Vec<_> = snapshots
        .iter()
        .map(|data| resolver.validate(data, &options).unwrap())
        .collect();

    let (resolver, options) = (&resolver, &options);
    let parallel: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = snapshots
            .iter()
            .map(|data| scope.spawn(move || resolver.validate(data, options).unwrap()))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("validation thread panicked"))
            .collect()
    });

    assert_eq!(parallel, sequential);
}
