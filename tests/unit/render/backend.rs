use super::*;

fn frame(data: Vec<u8>, w: u32, h: u32) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data,
        premultiplied: true,
    }
}

#[test]
fn pixel_reads_row_major() {
    let f = frame(vec![1, 2, 3, 4, 5, 6, 7, 8], 2, 1);
    assert_eq!(f.pixel(1, 0), Some([5, 6, 7, 8]));
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 1), None);
}

#[test]
fn to_straight_undoes_premultiplication() {
    let f = frame(vec![64, 32, 0, 128, 10, 20, 30, 255, 9, 9, 9, 0], 3, 1);
    let s = f.to_straight();
    assert_eq!(&s[0..4], &[128, 64, 0, 128]);
    assert_eq!(&s[4..8], &[10, 20, 30, 255]);
    assert_eq!(&s[8..12], &[0, 0, 0, 0]);
}

#[test]
fn straight_frames_are_left_alone() {
    let mut f = frame(vec![64, 32, 0, 128], 1, 1);
    f.premultiplied = false;
    assert_eq!(f.to_straight(), vec![64, 32, 0, 128]);
}

#[test]
fn fingerprint_covers_size_and_bytes() {
    let a = frame(vec![0; 16], 2, 2);
    let b = frame(vec![0; 16], 4, 1);
    let mut c = a.clone();
    c.data[5] = 1;
    assert_eq!(a.fingerprint(), a.clone().fingerprint());
    assert_ne!(a.fingerprint(), b.fingerprint());
    assert_ne!(a.fingerprint(), c.fingerprint());
}

#[test]
fn create_cpu_backend() {
    let backend = create_backend(BackendKind::Cpu, &RenderSettings::default()).unwrap();
    assert_eq!(backend.worker_render_settings(), Some(RenderSettings::default()));
}
