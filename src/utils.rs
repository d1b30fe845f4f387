// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::Instant;
use tokio::time::sleep;

use crate::error::Fallible;
use crate::error::fail;

// max-age is one week in seconds.
pub const CACHE_CONTROL_IMMUTABLE: &str = "public, max-age=604800, immutable";

const SERVER_WAIT_LIMIT: Duration = Duration::from_secs(10);

/// Poll until the drill server accepts connections.
pub async fn wait_for_server(host: &str, port: u16) -> Fallible<()> {
    let deadline = Instant::now() + SERVER_WAIT_LIMIT;
    loop {
        if TcpStream::connect(format!("{host}:{port}")).await.is_ok() {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return fail(format!("server at {host}:{port} did not come up."));
        }
        sleep(Duration::from_millis(5)).await;
    }
}

#[cfg(test)]
mod tests {
    use tokio::net::TcpListener;

    use super::*;

    #[tokio::test]
    async fn test_wait_for_listening_server() -> Fallible<()> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        wait_for_server("127.0.0.1", port).await
    }
}
