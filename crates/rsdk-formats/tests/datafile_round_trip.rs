#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for building and reading RSDK v4 data files
//!
//! Covers container round-trips with mixed encryption, name recovery from
//! candidate lists and name list files, content-derived fallback names, and
//! on-disk reads and writes.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rsdk_crypto::{DataFileCipher, NameHash};
use rsdk_formats::datafile::{
    DataFile, DataFileEntry, DataFileError, DataFileOptions, ENTRY_HEADER_SIZE, ExtensionType,
    HEADER_SIZE,
};
use std::io::Write;

/// Build `count` entries with lengths 0..count, alternating encryption
fn mixed_entries(count: usize) -> Vec<(String, Vec<u8>, bool)> {
    (0..count)
        .map(|i| {
            let name = format!("Data/Test/Entry{i}.bin");
            let data = (0..i).map(|b| (b * 7 + i) as u8).collect();
            (name, data, i % 2 == 1)
        })
        .collect()
}

fn build(entries: &[(String, Vec<u8>, bool)]) -> Vec<u8> {
    let mut file = DataFile::new();
    for (name, data, encrypted) in entries {
        file.add_file(name.clone(), data.clone(), *encrypted);
    }
    file.build().expect("Should build data file")
}

#[test]
fn round_trip_mixed_entries_without_names() {
    let originals = mixed_entries(24);
    let bytes = build(&originals);

    let parsed = DataFile::parse(&bytes).expect("Should parse data file");
    assert_eq!(parsed.len(), originals.len());

    for (entry, (_, data, encrypted)) in parsed.entries().iter().zip(&originals) {
        assert_eq!(entry.data(), data.as_slice());
        assert_eq!(entry.is_encrypted(), *encrypted);
        assert!(!entry.is_resolved());
    }
}

#[test]
fn round_trip_mixed_entries_with_names() {
    let originals = mixed_entries(10);
    let bytes = build(&originals);

    let options = DataFileOptions::new().with_names(originals.iter().map(|(n, _, _)| n.clone()));
    let parsed = DataFile::parse_with(&bytes, &options).expect("Should parse data file");

    let names: Vec<String> = parsed.entries().iter().map(|e| e.name().into_owned()).collect();
    let expected: Vec<String> = originals.iter().map(|(n, _, _)| n.clone()).collect();
    assert_eq!(names, expected);
}

#[test]
fn encrypted_payload_is_not_stored_in_plaintext() {
    let payload = b"RIFF\x24\x00\x00\x00WAVEfmt secret sound".to_vec();
    let mut file = DataFile::new();
    file.add_file("Data/SoundFX/Global/Jump.wav", payload.clone(), true);
    let bytes = file.build().expect("Should build data file");

    let start = HEADER_SIZE + ENTRY_HEADER_SIZE;
    assert_eq!(&bytes[start..], DataFileCipher::encrypt(&payload).as_slice());
    assert_ne!(&bytes[start..], payload.as_slice());

    let parsed = DataFile::parse(&bytes).expect("Should parse data file");
    assert_eq!(parsed.entries()[0].data(), payload.as_slice());
    assert_eq!(parsed.entries()[0].name(), "SoundEffect1.wav");
}

#[test]
fn fallback_names_follow_content_type() {
    let mut file = DataFile::new();
    file.add_file("a", b"Oggs....".to_vec(), false);
    file.add_file("b", b"GIF89a".to_vec(), true);
    file.add_file("c", b"PNG....".to_vec(), false);
    file.add_file("d", b"R3D\0model".to_vec(), true);
    file.add_file("e", b"RIFF....".to_vec(), false);
    file.add_file("f", Vec::new(), false);
    let bytes = file.build().expect("Should build data file");

    let parsed = DataFile::parse(&bytes).expect("Should parse data file");
    let names: Vec<String> = parsed.entries().iter().map(|e| e.name().into_owned()).collect();
    assert_eq!(
        names,
        vec![
            "Music1.ogg",
            "Sprite2.gif",
            "Image3.png",
            "Model4.bin",
            "SoundEffect5.wav",
            "UnknownFileType6.bin",
        ]
    );
    assert_eq!(parsed.entries()[2].extension(), ExtensionType::Png);
}

#[test]
fn ogg_capture_pattern_with_capital_s_is_unknown() {
    let mut file = DataFile::new();
    file.add_file("a", b"OggS\x00\x02".to_vec(), true);
    file.add_file("b", b"Oggs\x00\x02".to_vec(), true);
    let bytes = file.build().expect("Should build data file");

    let parsed = DataFile::parse(&bytes).expect("Should parse data file");
    assert_eq!(parsed.entries()[0].extension(), ExtensionType::Unknown);
    assert_eq!(parsed.entries()[0].name(), "UnknownFileType1.bin");
    assert_eq!(parsed.entries()[1].extension(), ExtensionType::Ogg);
    assert_eq!(parsed.entries()[1].name(), "Music2.ogg");
}

#[test]
fn resolution_against_candidate_list() {
    let mut file = DataFile::new();
    file.push(DataFileEntry::from_hash(
        NameHash::from_name("Music1.ogg"),
        b"Oggs".to_vec(),
        false,
    ));
    let bytes = file.build().expect("Should build data file");

    let miss = DataFile::parse_with(&bytes, &DataFileOptions::new().with_names(["foo", "bar"]))
        .expect("Should parse data file");
    assert!(!miss.entries()[0].is_resolved());
    assert_eq!(
        miss.entries()[0].identity().hash(),
        &NameHash::from_name("Music1.ogg")
    );

    let hit = DataFile::parse_with(
        &bytes,
        &DataFileOptions::new().with_names(["foo", "Music1.ogg", "bar"]),
    )
    .expect("Should parse data file");
    assert_eq!(hit.entries()[0].name(), "Music1.ogg");
}

#[test]
fn name_list_file_and_disk_round_trip() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let data_path = dir.path().join("Data.rsdk");
    let list_path = dir.path().join("names.txt");

    let mut file = DataFile::new();
    file.add_file("Data/Game/GameConfig.bin", b"config".to_vec(), false);
    file.add_file("Data/Stages/Zone01/Act1.bin", vec![0x5A; 300], true);
    file.save(&data_path).expect("Should save data file");
    assert_eq!(file.entries()[1].offset() as usize, HEADER_SIZE + 2 * ENTRY_HEADER_SIZE + 6);

    let mut list = std::fs::File::create(&list_path).expect("Failed to create list");
    writeln!(list, "# stage names").unwrap();
    writeln!(list, "Data\\Stages\\Zone01\\Act1.bin").unwrap();
    drop(list);

    let mut options = DataFileOptions::new();
    assert_eq!(options.load_name_list(&list_path).expect("Should load list"), 1);

    let loaded = DataFile::open(&data_path, &options).expect("Should open data file");
    assert_eq!(loaded.len(), 2);
    assert!(!loaded.entries()[0].is_resolved());
    assert_eq!(loaded.entries()[1].name(), "Data\\Stages\\Zone01\\Act1.bin");
    assert_eq!(
        loaded.get_file_data("data/stages/zone01/act1.bin").unwrap(),
        vec![0x5A; 300].as_slice()
    );
    assert_eq!(loaded.get_file_data("Data/Game/GameConfig.bin").unwrap(), b"config");
}

#[test]
fn rejects_other_container_versions() {
    let mut bytes = build(&mixed_entries(3));
    bytes[..6].copy_from_slice(b"RSDK\x05\x00");
    let err = DataFile::parse(&bytes).expect_err("v5 signature must be rejected");
    assert!(matches!(err, DataFileError::InvalidSignature(_)));
}

#[test]
fn rejects_offsets_past_end_of_stream() {
    let mut bytes = build(&mixed_entries(3));
    // Point entry 2 far past the end of the file
    let offset_pos = HEADER_SIZE + 2 * ENTRY_HEADER_SIZE + 16;
    bytes[offset_pos..offset_pos + 4].copy_from_slice(&0x00FF_FFFFu32.to_le_bytes());

    let err = DataFile::parse(&bytes).expect_err("Out of range offset must fail");
    assert!(matches!(
        err,
        DataFileError::EntryOutOfBounds {
            index: 2,
            offset: 0x00FF_FFFF,
            ..
        }
    ));
}

proptest! {
    #[test]
    fn prop_container_round_trip(
        entries in proptest::collection::vec(
            (proptest::collection::vec(any::<u8>(), 0..512), any::<bool>()),
            0..16,
        )
    ) {
        let mut file = DataFile::new();
        for (i, (data, encrypted)) in entries.iter().enumerate() {
            file.add_file(format!("Data/Prop/{i}.bin"), data.clone(), *encrypted);
        }
        let bytes = file.build().expect("Should build data file");

        let parsed = DataFile::parse(&bytes).expect("Should parse data file");
        prop_assert_eq!(parsed.len(), entries.len());
        for (entry, (data, encrypted)) in parsed.entries().iter().zip(&entries) {
            prop_assert_eq!(entry.data(), data.as_slice());
            prop_assert_eq!(entry.is_encrypted(), *encrypted);
        }
        prop_assert_eq!(parsed.build().expect("Should rebuild data file"), bytes);
    }
}
