use crate::Count;
use crate::Sample;
use anyhow::Context;
use std::path::Path;

/// The global saturating histogram.
///
/// Sized to the declared output grid `width x height` and indexed
/// directly by sample value. Only the observed domain is ever written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    width: u32,
    height: u32,
    bins: Vec<Count>,
}

impl Histogram {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bins: vec![Count::ZERO; width as usize * height as usize],
        }
    }
    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }
    pub fn len(&self) -> usize {
        self.bins.len()
    }
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
    /// the count for a value. zero for values never observed.
    pub fn get(&self, value: Sample) -> Count {
        self.bins
            .get(value as usize)
            .copied()
            .unwrap_or(Count::ZERO)
    }
    pub fn bins(&self) -> &[Count] {
        &self.bins
    }
    pub(crate) fn bins_mut(&mut self) -> &mut [Count] {
        &mut self.bins
    }
    pub fn reset(&mut self) {
        self.bins.fill(Count::ZERO);
    }
    pub fn as_bytes(&self) -> Vec<u8> {
        self.bins.iter().copied().map(u8::from).collect()
    }
    /// non-zero bins as (value, count), ascending
    pub fn occupied(&self) -> impl Iterator<Item = (Sample, Count)> + '_ {
        self.bins
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != Count::ZERO)
            .map(|(v, c)| (v as Sample, *c))
    }

    /// write the histogram as a binary PGM image, one grey byte per bin
    pub fn dump(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        use std::io::Write;
        let path = path.as_ref();
        log::info!("{:<32}{}", "dumping histogram", path.display());
        let file = std::fs::File::create(path)
            .with_context(|| format!("create output file {}", path.display()))?;
        let ref mut writer = std::io::BufWriter::new(file);
        write!(writer, "P5\n{} {}\n{}\n", self.width, self.height, crate::SATURATION)?;
        writer.write_all(&self.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

impl std::fmt::Display for Histogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (value, count) in self.occupied() {
            writeln!(f, "{:>10} {:>3}", value, u8::from(count))?;
        }
        Ok(())
    }
}
