use proptest::prelude::*;
use volren_lib::{
    color::Color,
    defaults::{GRADIENT_FACTOR, TF_SLOT_COUNT},
    render::RenderMode,
    shader::{names, ShaderBinding},
    test_helpers::{dat_bytes, ramp_words},
    TransferFunctionModel, VolumeError, VolumeField,
};

fn header_and_samples(w: u16, h: u16, d: u16, n: usize) -> Vec<u16> {
    let mut words = vec![w, h, d];
    words.extend((0..n).map(|i| (i % 4096) as u16));
    words
}

proptest! {
    #[test]
    fn valid_payload_is_accepted(w in 1u16..12, h in 1u16..12, d in 1u16..12) {
        let n = w as usize * h as usize * d as usize;
        let volume = VolumeField::new(&header_and_samples(w, h, d, n)).unwrap();

        prop_assert_eq!(volume.samples().len(), n);
        prop_assert!(volume.samples().iter().all(|s| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn samples_match_raw_words(
        (w, h, d, payload) in (1u16..8, 1u16..8, 1u16..8).prop_flat_map(|(w, h, d)| {
            let n = w as usize * h as usize * d as usize;
            (Just(w), Just(h), Just(d), prop::collection::vec(0u16..=4095, n))
        })
    ) {
        let mut raw = vec![w, h, d];
        raw.extend(&payload);
        let volume = VolumeField::from_bytes(&dat_bytes(&raw)).unwrap();

        let (w, h, d) = (w as usize, h as usize, d as usize);
        for z in 0..d {
            for y in 0..h {
                for x in 0..w {
                    let expected = raw[3 + x + w * (y + h * z)] as f32 / 4095.0;
                    prop_assert_eq!(volume.samples()[volume.index(x, y, z)], expected);
                    prop_assert_eq!(volume.get_data(x, y, z), Some(expected));
                }
            }
        }
        prop_assert_eq!(volume.get_data(w, 0, 0), None);
    }

    #[test]
    fn wrong_payload_length_is_rejected(
        w in 1u16..10,
        h in 1u16..10,
        d in 1u16..10,
        delta in prop_oneof![-5i64..0, 1i64..6],
    ) {
        let expected = w as usize * h as usize * d as usize;
        let n = (expected as i64 + delta).max(0) as usize;
        prop_assume!(n != expected);

        let res = VolumeField::new(&header_and_samples(w, h, d, n));
        let is_size_mismatch = matches!(res, Err(VolumeError::SizeMismatch { .. }));
        prop_assert!(is_size_mismatch);
    }

    #[test]
    fn gradient_boundary_is_zero(w in 3u16..9, h in 3u16..9, d in 3u16..9, seed in any::<u64>()) {
        let n = w as usize * h as usize * d as usize;
        let mut words = vec![w, h, d];
        let mut state = seed;
        for _ in 0..n {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            words.push(((state >> 33) % 4096) as u16);
        }
        let volume = VolumeField::new(&words).unwrap();
        let gradient = volume.compute_gradient();

        let (w, h, d) = (w as usize, h as usize, d as usize);
        for z in 0..d {
            for y in 0..h {
                prop_assert_eq!(gradient[volume.index(0, y, z)].x, 0.0);
                prop_assert_eq!(gradient[volume.index(w - 1, y, z)].x, 0.0);
            }
        }
        for z in 0..d {
            for x in 0..w {
                prop_assert_eq!(gradient[volume.index(x, 0, z)].y, 0.0);
            }
        }
        for y in 0..h {
            for x in 0..w {
                prop_assert_eq!(gradient[volume.index(x, y, 0)].z, 0.0);
            }
        }
        prop_assert!(gradient.iter().all(|g| g.w == 1.0));
    }

    #[test]
    fn ramp_has_constant_interior_gradient(w in 3u16..40, h in 1u16..5, d in 1u16..5) {
        let volume = VolumeField::new(&ramp_words(w, h, d)).unwrap();
        let gradient = volume.compute_gradient();
        let slope = 1.0 / (w - 1) as f32;
        // words are rounded to whole 12-bit steps
        let tolerance = 2.0 / 4095.0;

        for z in 0..d as usize {
            for y in 0..h as usize {
                for x in 1..(w as usize - 1) {
                    let gx = gradient[volume.index(x, y, z)].x;
                    prop_assert!((gx - GRADIENT_FACTOR * 2.0 * slope).abs() < tolerance);
                }
            }
        }
    }

    #[test]
    fn rebinding_never_leaks_dimensions(
        a in (1u16..8, 1u16..8, 1u16..8),
        b in (1u16..8, 1u16..8, 1u16..8),
    ) {
        let first = VolumeField::new(&ramp_words(a.0, a.1, a.2)).unwrap();
        let second = VolumeField::new(&ramp_words(b.0, b.1, b.2)).unwrap();
        let mut binding = ShaderBinding::for_mode(RenderMode::FirstHit);

        binding.set_volume(&first);
        let old = binding.uniform(names::VOLUME).and_then(|v| v.as_texture().cloned()).unwrap();
        binding.set_volume(&second);
        let new = binding.uniform(names::VOLUME).and_then(|v| v.as_texture().cloned()).unwrap();
        let gradient = binding.uniform(names::GRADIENT).and_then(|v| v.as_texture().cloned()).unwrap();
        let dims = binding.uniform(names::VOLUME_DIMS).and_then(|v| v.as_vec3()).unwrap();

        prop_assert_ne!(old.id(), new.id());
        prop_assert_eq!(new.size(), second.size());
        prop_assert_eq!(gradient.size(), second.size());
        prop_assert_eq!(dims, second.scale());
    }

    #[test]
    fn commits_fill_slots_in_order(points in prop::collection::vec((0.0f32..=1.0, 0.0f32..=1.0), 0..10)) {
        let mut model = TransferFunctionModel::new();

        for (i, (density, intensity)) in points.iter().enumerate() {
            model.update_live(*density, *intensity);
            let before = model.slots().to_vec();
            let res = model.commit(Color::WHITE);

            if i < TF_SLOT_COUNT {
                prop_assert_eq!(res, Some(i));
                let point = model.slots()[i].point().copied().unwrap();
                prop_assert_eq!(point.density, *density);
                prop_assert_eq!(point.intensity, *intensity);
            } else {
                prop_assert_eq!(res, None);
                prop_assert_eq!(model.slots(), &before[..]);
            }
        }
        prop_assert_eq!(model.markers().count(), points.len().min(TF_SLOT_COUNT));
    }

    #[test]
    fn clear_affects_one_slot(index in 0usize..TF_SLOT_COUNT) {
        let mut model = TransferFunctionModel::new();
        for i in 0..TF_SLOT_COUNT {
            model.update_live(i as f32 / 5.0, 0.5);
            model.commit(Color::new(i as u8, 0, 0));
        }
        let before = model.slots().to_vec();

        model.clear_slot(index).unwrap();

        for (i, slot) in model.slots().iter().enumerate() {
            if i == index {
                prop_assert!(slot.is_empty());
            } else {
                prop_assert_eq!(slot, &before[i]);
            }
        }
    }

    #[test]
    fn odd_byte_count_is_truncated(words in prop::collection::vec(any::<u16>(), 3..20)) {
        let mut bytes = dat_bytes(&words);
        bytes.push(0);

        let res = VolumeField::from_bytes(&bytes);
        let is_truncated = matches!(res, Err(VolumeError::TruncatedSample { .. }));
        prop_assert!(is_truncated);
    }
}
