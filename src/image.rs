use crate::Arbitrary;
use crate::Sample;
use anyhow::Context;
use byteorder::ByteOrder;
use byteorder::NativeEndian;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

/// An input image: the sample grid plus the declared output grid.
///
/// On disk, four native-endian `u32` header words
/// `img_width, img_height, histo_width, histo_height`
/// followed by `img_width * img_height` native-endian `u32` samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    histo_width: u32,
    histo_height: u32,
    samples: Vec<Sample>,
}

impl Image {
    pub fn new(
        width: u32,
        height: u32,
        histo_width: u32,
        histo_height: u32,
        samples: Vec<Sample>,
    ) -> anyhow::Result<Self> {
        let n = Self::area(width, height)?;
        anyhow::ensure!(
            samples.len() == n,
            "expected {} x {} = {} samples, got {}",
            width,
            height,
            n,
            samples.len()
        );
        Ok(Self {
            width,
            height,
            histo_width,
            histo_height,
            samples,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }
    pub fn histo_width(&self) -> u32 {
        self.histo_width
    }
    pub fn histo_height(&self) -> u32 {
        self.histo_height
    }
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    fn area(width: u32, height: u32) -> anyhow::Result<usize> {
        (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| anyhow::anyhow!("image dimensions {} x {} overflow", width, height))
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        log::info!("{:<32}{}", "loading image", path.display());
        let file = File::open(path).with_context(|| format!("open input file {}", path.display()))?;
        Self::read(&mut BufReader::new(file))
    }

    pub fn read(reader: &mut impl Read) -> anyhow::Result<Self> {
        let mut header = [0u32; 4];
        reader
            .read_u32_into::<NativeEndian>(&mut header)
            .context("error reading input and output dimensions from file")?;
        let [width, height, histo_width, histo_height] = header;
        let n = Self::area(width, height).context("error reading input array from file")?;
        let size = n
            .checked_mul(std::mem::size_of::<Sample>())
            .ok_or_else(|| anyhow::anyhow!("{} x {} samples overflow", width, height))
            .context("error reading input array from file")?;
        // grow with the bytes actually present, not with the header's claim
        let mut raw = Vec::new();
        reader
            .take(size as u64)
            .read_to_end(&mut raw)
            .context("error reading input array from file")?;
        anyhow::ensure!(
            raw.len() == size,
            "error reading input array from file: expected {} bytes, got {}",
            size,
            raw.len()
        );
        let mut samples = vec![0; n];
        NativeEndian::read_u32_into(&raw, &mut samples);
        log::debug!("read {} x {} samples", width, height);
        Self::new(width, height, histo_width, histo_height, samples)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        log::info!("{:<32}{}", "saving image", path.display());
        let file =
            File::create(path).with_context(|| format!("create image file {}", path.display()))?;
        let ref mut writer = BufWriter::new(file);
        self.write(writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn write(&self, writer: &mut impl Write) -> anyhow::Result<()> {
        writer.write_u32::<NativeEndian>(self.width)?;
        writer.write_u32::<NativeEndian>(self.height)?;
        writer.write_u32::<NativeEndian>(self.histo_width)?;
        writer.write_u32::<NativeEndian>(self.histo_height)?;
        for &sample in self.samples.iter() {
            writer.write_u32::<NativeEndian>(sample)?;
        }
        Ok(())
    }

    /// deterministic pseudo-random image with samples in `[0, levels)`
    pub fn generate(
        width: u32,
        height: u32,
        histo_width: u32,
        histo_height: u32,
        levels: u32,
        seed: u64,
    ) -> anyhow::Result<Self> {
        use rand::Rng;
        use rand::SeedableRng;
        use rand::rngs::SmallRng;
        anyhow::ensure!(levels > 0, "levels must be positive");
        let ref mut rng = SmallRng::seed_from_u64(seed);
        let samples = (0..Self::area(width, height)?)
            .map(|_| rng.random_range(0..levels))
            .collect();
        Self::new(width, height, histo_width, histo_height, samples)
    }
}

impl Arbitrary for Image {
    fn random() -> Self {
        use rand::Rng;
        const HISTO_WIDTH: u32 = 64;
        const HISTO_HEIGHT: u32 = 16;
        let ref mut rng = rand::rng();
        let width = rng.random_range(1..=96);
        let height = rng.random_range(1..=96);
        let lo = rng.random_range(0..HISTO_WIDTH * HISTO_HEIGHT / 2);
        let hi = rng.random_range(lo..HISTO_WIDTH * HISTO_HEIGHT);
        let samples = (0..width * height)
            .map(|_| rng.random_range(lo..=hi))
            .collect();
        Self {
            width,
            height,
            histo_width: HISTO_WIDTH,
            histo_height: HISTO_HEIGHT,
            samples,
        }
    }
}
