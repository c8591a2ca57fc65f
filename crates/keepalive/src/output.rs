use std::io::Write;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Which of the supervisor's own streams a child stream is forwarded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
	Stdout,
	Stderr,
}

const CHUNK_SIZE: usize = 4096;

/// Copies `reader` to `stream` in the background until the child closes it.
pub fn forward<R>(name: &str, reader: R, stream: Stream)
where
	R: AsyncRead + Unpin + Send + 'static,
{
	let name = name.to_string();
	tokio::spawn(async move {
		let result = match stream {
			Stream::Stdout => pipe_lines(reader, std::io::stdout()).await,
			Stream::Stderr => pipe_lines(reader, std::io::stderr()).await,
		};
		if let Err(e) = result {
			tracing::debug!("{}: stopped forwarding {:?}: {}", name, stream, e);
		}
	});
}

/// Forwards whatever the child has written as soon as it arrives.
///
/// Complete lines in a chunk go out in one write so concurrent children do
/// not interleave mid-line. Data without a newline (prompts, progress bars)
/// is written immediately rather than held back, so at most `CHUNK_SIZE`
/// bytes are ever buffered.
pub async fn pipe_lines<R, W>(reader: R, mut writer: W) -> std::io::Result<()>
where
	R: AsyncRead + Unpin,
	W: Write,
{
	let mut reader = BufReader::with_capacity(CHUNK_SIZE, reader);

	loop {
		let chunk = reader.fill_buf().await?;
		if chunk.is_empty() {
			return Ok(());
		}
		let n = match chunk.iter().rposition(|&b| b == b'\n') {
			Some(last_newline) => last_newline + 1,
			None => chunk.len(),
		};
		writer.write_all(&chunk[..n])?;
		writer.flush()?;
		reader.consume(n);
	}
}
