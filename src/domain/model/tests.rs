// Unit tests for domain models

use super::*;
use chrono::TimeZone;

fn sample_clip() -> Clip {
    Clip {
        id: ClipId::new("1718000000000"),
        name: "Trip".to_string(),
        description: String::new(),
        video_uri: "file://a.mp4".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 6, 10, 6, 13, 20).unwrap(),
        duration_seconds: 4.5,
        asset_id: None,
    }
}

#[test]
fn test_clip_serializes_with_snapshot_field_names() {
    let value = serde_json::to_value(sample_clip()).unwrap();
    let object = value.as_object().unwrap();

    let mut keys: Vec<&str> = object.keys().map(|k| k.as_str()).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["createdAt", "description", "duration", "id", "name", "videoUri"]
    );
    assert_eq!(object["id"], "1718000000000");
    assert_eq!(object["videoUri"], "file://a.mp4");
    assert_eq!(object["duration"], 4.5);
}

#[test]
fn test_clip_reads_snapshot_written_without_asset_id() {
    let json = r#"[{"id":"1","name":"Beach","description":"sunset","videoUri":"file://b.mp4","createdAt":"2024-06-10T06:13:20.000Z","duration":3.25}]"#;
    let clips: Vec<Clip> = serde_json::from_str(json).unwrap();

    assert_eq!(clips.len(), 1);
    assert_eq!(clips[0].id.as_str(), "1");
    assert_eq!(clips[0].description, "sunset");
    assert_eq!(clips[0].asset_id, None);
    assert_eq!(clips[0].duration_seconds, 3.25);
}

#[test]
fn test_clip_keeps_asset_id() {
    let mut clip = sample_clip();
    clip.asset_id = Some("asset-7".to_string());

    let json = serde_json::to_string(&clip).unwrap();
    assert!(json.contains(r#""assetId":"asset-7""#));

    let back: Clip = serde_json::from_str(&json).unwrap();
    assert_eq!(back, clip);
}

#[test]
fn test_from_new_clamps_negative_duration() {
    let new = NewClip::new("Trip", "file://a.mp4", -1.0);
    let clip = Clip::from_new(ClipId::new("1"), Utc::now(), new);
    assert_eq!(clip.duration_seconds, 0.0);
}

#[test]
fn test_from_new_zeroes_non_finite_duration() {
    for seconds in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
        let new = NewClip::new("Trip", "file://a.mp4", seconds);
        let clip = Clip::from_new(ClipId::new("1"), Utc::now(), new);
        assert_eq!(clip.duration_seconds, 0.0);
        assert!(serde_json::to_string(&clip).unwrap().contains("\"duration\":0.0"));
    }
}

#[test]
fn test_trim_range_validation() {
    let range = TrimRange::new(10.0, 15.5).unwrap();
    assert_eq!(range.start(), 10.0);
    assert_eq!(range.end(), 15.5);
    assert_eq!(range.duration(), 5.5);

    assert!(TrimRange::new(5.0, 5.0).is_err());
    assert!(TrimRange::new(6.0, 5.0).is_err());
    assert!(TrimRange::new(-1.0, 5.0).is_err());
    assert!(TrimRange::new(0.0, f64::NAN).is_err());
}

#[test]
fn test_metadata_entries_skip_empty_values() {
    let metadata = ClipMetadata {
        title: "Trip".to_string(),
        description: String::new(),
    };
    assert_eq!(metadata.entries(), vec![("title", "Trip")]);
}
