use assertables::assert_contains;
use pathsplit::{split_document, split_str_default, Error, PathError, SplitConfig, TagStatus};
use std::ops::ControlFlow;

const VECTOR: &str = r##"<vector xmlns:android="http://schemas.android.com/apk/res/android"
    android:width="24dp"
    android:height="24dp"
    android:viewportWidth="24"
    android:viewportHeight="24">
    <path android:fillColor="#3DDC84" android:pathData="M30,30v-10h-10zh10v10z"/>
    <path android:fillColor="#000000" android:pathData="M2,2h20v20h-20z"/>
    <path android:fillColor="#000000" android:fillType="evenOdd" android:pathData="M2,2h20v20h-20zM6,6h12v12h-12z"/>
</vector>
"##;

#[test]
fn test_vector_drawable() {
    let report = split_str_default(VECTOR).unwrap();
    let statuses: Vec<_> = report.tags.iter().map(|t| (t.line, t.status)).collect();
    assert_eq!(statuses.len(), 3);
    assert_eq!(statuses[0], (6, TagStatus::Split(2)));
    assert_eq!(statuses[1], (7, TagStatus::Unchanged));

    let output = report.output.unwrap();
    assert_contains!(
        output,
        concat!(
            r##"    <path android:fillColor="#3DDC84" android:pathData="M30,30v-10h-10z"/>"##,
            "\n",
            r##"    <path android:fillColor="#3DDC84" android:pathData="M30,30h10v10z"/>"##,
            "\n",
        )
    );
    assert_eq!(output.lines().count(), VECTOR.lines().count() + 1);
}

#[test]
fn test_invalid_path_data_reported() {
    let input = r##"<vector>
    <path android:pathData="M10,10,"/>
    <path android:pathData="L10,10zM1,1z"/>
    <path android:pathData="M1,1z M1E2147483648,0"/>
</vector>"##;
    let report = split_str_default(input).unwrap();
    assert_eq!(report.output, None);
    assert_eq!(
        report.failures().collect::<Vec<_>>(),
        [
            (2, PathError::MissingArgs),
            (3, PathError::BadStart),
            (4, PathError::BadNumber),
        ]
    );
}

#[test]
fn test_progress_observer() {
    let mut last = None;
    let report = split_document(VECTOR, &SplitConfig::default(), |progress| {
        last = Some(progress);
        ControlFlow::Continue(())
    })
    .unwrap();
    assert_eq!(report.split_count(), 1);
    let last = last.unwrap();
    assert_eq!(last.tags, 3);
    assert_eq!(last.tag, 2);
    assert_eq!(last.splits, 1);
}

#[test]
fn test_cancel() {
    let result = split_document(VECTOR, &SplitConfig::default(), |progress| {
        if progress.splits > 0 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    assert!(matches!(result, Err(Error::Cancelled)));
}
