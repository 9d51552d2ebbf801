//! End-to-end decoding tests
//!
//! Builds synthetic 512-byte images and runs them through the full pipeline.

use spd_decode::{
    annotate, crc16_xmodem, decode, fields, RamType, RawWindow, SpdError, SpdLayout, TotalBytes,
    UsedBytes, Vendor, WINDOW_LEN,
};

/// A Crucial DDR4 SO-DIMM image with a valid CRC.
fn crucial_image() -> Vec<u8> {
    let mut bytes = vec![0u8; WINDOW_LEN];
    bytes[0x000] = 0x92;
    bytes[0x001] = 0x11;
    bytes[0x002] = 0x0C;
    bytes[0x003] = 0x03;
    bytes[0x004] = 0x45;
    // module manufacturer + date + serial
    bytes[0x140] = 0x80;
    bytes[0x141] = 0x2C;
    bytes[0x142] = 0x06;
    bytes[0x143] = 0x19;
    bytes[0x144] = 0x27;
    bytes[0x145..0x149].copy_from_slice(&[0xEF, 0xBE, 0xAD, 0xDE]);
    let part = b"CT8G4SFS824A.C8FE";
    bytes[0x149..0x149 + part.len()].copy_from_slice(part);
    // DRAM manufacturer
    bytes[0x15E] = 0x80;
    bytes[0x15F] = 0x2C;
    fix_crc(&mut bytes);
    bytes
}

fn fix_crc(bytes: &mut [u8]) {
    let crc = crc16_xmodem(&bytes[..126]);
    bytes[126..128].copy_from_slice(&crc.to_le_bytes());
}

#[test]
fn crucial_module_decodes() {
    let bytes = crucial_image();
    let spd = decode(&RawWindow::new(0x0004_2000, &bytes)).unwrap();

    assert_eq!(spd.offset(), 0x0004_2000);
    assert_eq!(spd.ram_type(), RamType::Ddr4Sdram);
    assert_eq!(spd.ram_type().to_string(), "SD-DDR4");
    assert_eq!(spd.vendor().name(), "Crucial/Micron");
    assert_eq!(spd.module_part_number(), "CT8G4SFS824A.C8FE");
    assert_eq!(spd.total_bytes(), TotalBytes::Bytes256);
    assert_eq!(spd.used_bytes(), UsedBytes::Bytes256);
    assert_eq!(spd.revision().to_string(), "1.1");
    assert_eq!(spd.calculated_checksum(), spd.stored_checksum());
    assert!(spd.validity_score() >= 2.0 / 3.0);
    assert!((spd.validity_score() - 1.0).abs() < f64::EPSILON);

    let mfg = spd.manufacturing();
    assert_eq!(mfg.module_vendor, Vendor::CrucialMicron);
    assert_eq!(mfg.serial, 0xDEAD_BEEF);
    assert_eq!(mfg.year_week(), Some((2019, 27)));
}

#[test]
fn calculated_checksum_is_independent_crc() {
    let bytes = crucial_image();
    let spd = decode(&RawWindow::new(0, &bytes)).unwrap();

    let mut expected = 0u16;
    for &b in &bytes[..126] {
        expected ^= u16::from(b) << 8;
        for _ in 0..8 {
            expected = if expected & 0x8000 == 0 {
                expected << 1
            } else {
                (expected << 1) ^ 0x1021
            };
        }
    }
    assert_eq!(spd.calculated_checksum(), expected);
}

#[test]
fn crc_mismatch_lowers_score_but_decodes() {
    let mut bytes = crucial_image();
    bytes[0x07E] ^= 0x01;

    let spd = decode(&RawWindow::new(0, &bytes)).unwrap();
    assert_ne!(spd.calculated_checksum(), spd.stored_checksum());
    assert!(!spd.signals().checksum_match);
    assert!((spd.validity_score() - 2.0 / 3.0).abs() < f64::EPSILON);
}

#[test]
fn unprogrammed_module_scores_zero() {
    let mut bytes = crucial_image();
    bytes[0x15E] = 0;
    bytes[0x15F] = 0;
    bytes[0x149..0x15D].fill(b' ');
    bytes[0x07E] ^= 0xFF;

    let spd = decode(&RawWindow::new(0, &bytes)).unwrap();
    assert_eq!(spd.vendor(), Vendor::Unknown(0));
    assert_eq!(spd.vendor().name(), "Unknown");
    assert!(!spd.signals().part_number_programmed);
    assert_eq!(spd.module_part_number(), " ".repeat(20));
    assert!(spd.validity_score().abs() < f64::EPSILON);
}

#[test]
fn nul_part_number_is_empty_but_counts_as_programmed() {
    let mut bytes = crucial_image();
    bytes[0x149..0x15D].fill(0);
    fix_crc(&mut bytes);

    let spd = decode(&RawWindow::new(0, &bytes)).unwrap();
    assert_eq!(spd.module_part_number(), "");
    assert!(spd.signals().part_number_programmed);
}

#[test]
fn score_is_always_a_third_multiple() {
    let allowed = [0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0];
    let base = crucial_image();
    for variant in 0..8u8 {
        let mut bytes = base.clone();
        if variant & 1 != 0 {
            bytes[0x07F] ^= 0x80;
        }
        if variant & 2 != 0 {
            bytes[0x15E..0x160].fill(0);
        }
        if variant & 4 != 0 {
            bytes[0x149..0x15D].fill(b' ');
        }
        let spd = decode(&RawWindow::new(0, &bytes)).unwrap();
        assert!(allowed.contains(&spd.validity_score()), "variant {variant}");
    }
}

#[test]
fn lpddr_types() {
    let mut bytes = crucial_image();
    bytes[0x002] = 0x10;
    assert_eq!(
        decode(&RawWindow::new(0, &bytes)).unwrap().ram_type(),
        RamType::Lpddr4
    );
    bytes[0x002] = 0x11;
    assert_eq!(
        decode(&RawWindow::new(0, &bytes)).unwrap().ram_type(),
        RamType::Lpddr4x
    );
}

#[test]
fn ddr3_rejected_with_offset() {
    let mut bytes = crucial_image();
    bytes[0x002] = 0x0B;
    let err = decode(&RawWindow::new(0x1234, &bytes)).unwrap_err();
    assert_eq!(
        err,
        SpdError::WrongGenerationType {
            offset: 0x1234,
            code: 0x0B
        }
    );
}

#[test]
fn foreign_device_type_rejected() {
    let mut bytes = crucial_image();
    bytes[0x002] = 0x12;
    let err = decode(&RawWindow::new(0x80, &bytes)).unwrap_err();
    assert_eq!(
        err,
        SpdError::UnsupportedDeviceType {
            offset: 0x80,
            code: 0x12
        }
    );
}

#[test]
fn illegal_status_byte_rejected_before_device_type() {
    let mut bytes = crucial_image();
    bytes[0x000] = 0x35;
    bytes[0x002] = 0xFF;
    let err = decode(&RawWindow::new(0, &bytes)).unwrap_err();
    assert!(matches!(err, SpdError::InvalidLengthCode { status: 0x35, .. }));
}

#[test]
fn zero_status_byte_is_flagged_not_rejected() {
    let mut bytes = crucial_image();
    bytes[0x000] = 0x00;
    fix_crc(&mut bytes);
    let spd = decode(&RawWindow::new(0, &bytes)).unwrap();
    assert!(spd.is_length_unspecified());
    assert_eq!(spd.total_bytes().count(), 0);
}

#[test]
fn truncated_window() {
    let bytes = crucial_image();
    let err = decode(&RawWindow::new(0x10, &bytes[..300])).unwrap_err();
    assert_eq!(err, SpdError::truncated(0x10, WINDOW_LEN, 300));
    assert_eq!(err.offset(), 0x10);
}

#[test]
fn batch_continues_past_bad_windows() {
    let good = crucial_image();
    let mut ddr3 = crucial_image();
    ddr3[0x002] = 0x0B;
    let short = &good[..64];

    let windows = [
        RawWindow::new(0x000, &good),
        RawWindow::new(0x200, &ddr3),
        RawWindow::new(0x400, short),
        RawWindow::new(0x600, &good),
    ];
    let results: Vec<_> = windows.iter().map(decode).collect();

    assert!(results[0].is_ok());
    assert!(matches!(
        results[1],
        Err(SpdError::WrongGenerationType { offset: 0x200, .. })
    ));
    assert!(matches!(
        results[2],
        Err(SpdError::TruncatedInput { offset: 0x400, .. })
    ));
    assert_eq!(results[3].as_ref().unwrap().offset(), 0x600);
}

#[test]
fn decode_is_repeatable() {
    let bytes = crucial_image();
    let window = RawWindow::new(0, &bytes);
    assert_eq!(decode(&window).unwrap(), decode(&window).unwrap());
}

#[test]
fn annotated_dump_covers_every_region() {
    let bytes = crucial_image();
    let window = RawWindow::new(0, &bytes);
    let layout = SpdLayout::new(&window).unwrap();
    let spd = layout.decode().unwrap();
    let text = annotate::render(&layout, &spd);

    assert!(text.starts_with("# TotalBytes: 256 ; BytesUsed: 256\n92\n"));
    assert!(text.contains("# SPD Revision 1.1\n11\n"));
    assert!(text.contains("# DDR Ramtype: SD-DDR4\n0C\n"));
    assert!(text.contains("Match!"));
    assert!(text.contains("## DRAM Manufacturer: \"Crucial/Micron\" (0x2C80)"));
    assert!(text.contains("## Module Part Number: \"CT8G4SFS824A.C8FE\""));
    assert!(text.contains("(week 27 of 2019)"));
    assert!(text.contains("DEADBEEF"));
    for block in [
        fields::MODULE_SPECIFIC,
        fields::HYBRID_MEMORY,
        fields::EXTENDED_FUNCTION,
        fields::END_USER,
    ] {
        assert!(text.contains(&format!("# {}\n", block.name)), "{}", block.name);
    }

    for line in text.lines().filter(|l| !l.starts_with('#') && !l.is_empty()) {
        let count = line.split(' ').count();
        assert!(count <= 16, "row too long: {line}");
        assert!(
            line.split(' ').all(|h| h.len() % 2 == 0
                && h.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase())),
            "not uppercase hex: {line}"
        );
    }
}

#[test]
fn annotated_dump_reports_mismatch() {
    let mut bytes = crucial_image();
    bytes[0x07E] = 0x00;
    bytes[0x07F] = 0x00;
    let window = RawWindow::new(0, &bytes);
    let layout = SpdLayout::new(&window).unwrap();
    let spd = layout.decode().unwrap();
    let text = annotate::render(&layout, &spd);
    assert!(text.contains("# CRC Is: 0x0000 Calculated: "));
    assert!(text.contains("Not Matching"));
}

#[test]
fn records_cross_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RawWindow<'static>>();
    assert_send_sync::<SpdLayout<'static>>();
    assert_send_sync::<spd_decode::DecodedSpd>();

    let bytes = crucial_image();
    let handles: Vec<_> = (0..4u64)
        .map(|i| {
            let bytes = bytes.clone();
            std::thread::spawn(move || {
                decode(&RawWindow::new(i * 0x200, &bytes))
                    .unwrap()
                    .offset()
            })
        })
        .collect();
    let offsets: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(offsets, vec![0, 0x200, 0x400, 0x600]);
}

#[test]
fn annotated_header_bytes_follow_decoded_values() {
    let mut bytes = crucial_image();
    bytes[0x001] = 0x12;
    bytes[0x002] = 0x11;
    fix_crc(&mut bytes);
    let window = RawWindow::new(0, &bytes);
    let layout = SpdLayout::new(&window).unwrap();
    let spd = layout.decode().unwrap();
    let text = annotate::render(&layout, &spd);

    assert!(text.contains("# SPD Revision 1.2\n12\n"), "{text}");
    assert!(text.contains("# DDR Ramtype: LPDDR4X\n11\n"), "{text}");
}
