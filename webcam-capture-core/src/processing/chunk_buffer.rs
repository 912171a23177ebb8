/// Ordered, append-only store for encoded chunks of one recording.
///
/// Wrap in `Arc<parking_lot::Mutex<ChunkBuffer>>` to share it with the
/// encoder's chunk callback.
///
/// Each recording opens the buffer under a fresh generation number. Pushes
/// tagged with any other generation (a late chunk from an encoder that has
/// already been torn down) are dropped, as are empty chunks. Once the
/// contents are taken or discarded the buffer is closed until the next reset.
#[derive(Debug, Default)]
pub struct ChunkBuffer {
    generation: Option<u64>,
    chunks: Vec<Vec<u8>>,
    total_bytes: usize,
}

impl ChunkBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear any leftovers and accept chunks for `generation`.
    pub fn reset(&mut self, generation: u64) {
        self.chunks.clear();
        self.total_bytes = 0;
        self.generation = Some(generation);
    }

    /// Append a chunk. Returns `false` if it was dropped.
    pub fn push(&mut self, generation: u64, chunk: &[u8]) -> bool {
        if chunk.is_empty() || self.generation != Some(generation) {
            return false;
        }
        self.chunks.push(chunk.to_vec());
        self.total_bytes += chunk.len();
        true
    }

    /// Concatenate every chunk in arrival order and close the buffer.
    ///
    /// Returns the payload and the number of chunks it was built from.
    pub fn take(&mut self) -> (Vec<u8>, usize) {
        let count = self.chunks.len();
        let mut payload = Vec::with_capacity(self.total_bytes);
        for chunk in self.chunks.drain(..) {
            payload.extend_from_slice(&chunk);
        }
        self.total_bytes = 0;
        self.generation = None;
        (payload, count)
    }

    /// Drop everything without producing a payload and close the buffer.
    ///
    /// Returns the number of chunks discarded.
    pub fn discard(&mut self) -> usize {
        let count = self.chunks.len();
        self.chunks.clear();
        self.total_bytes = 0;
        self.generation = None;
        count
    }

    /// Number of chunks currently held.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Total payload size currently held.
    pub fn byte_len(&self) -> usize {
        self.total_bytes
    }

    /// Whether the buffer is accepting chunks.
    pub fn is_open(&self) -> bool {
        self.generation.is_some()
    }
}
