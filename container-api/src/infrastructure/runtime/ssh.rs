// src/infrastructure/runtime/ssh.rs

use async_trait::async_trait;
use ssh2::Session;
use std::io::{self, ErrorKind, Read};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::{debug, info};

use super::{CommandOutput, ContainerRuntime, RuntimeError};
use crate::config::{SshAuth, SshConfig};
use crate::domain::container::ContainerName;

/// SSH 経由でリモートホストのランタイム CLI を実行する
///
/// ssh2 はブロッキング API なので spawn_blocking 上で動かす。
/// 接続はリクエストごとに張り、コマンド実行後に閉じる。
pub struct SshRuntime {
    config: SshConfig,
    binary: String,
}

impl SshRuntime {
    pub fn new(config: SshConfig, binary: impl Into<String>) -> Self {
        Self {
            config,
            binary: binary.into(),
        }
    }

    pub fn remote_command(&self, name: &ContainerName) -> String {
        format!("{} rm -f {}", self.binary, shell_quote(name.as_str()))
    }
}

#[async_trait]
impl ContainerRuntime for SshRuntime {
    async fn force_remove(&self, name: &ContainerName) -> Result<CommandOutput, RuntimeError> {
        let config = self.config.clone();
        let command = self.remote_command(name);

        info!(
            host = %config.host,
            port = config.port,
            auth = config.auth.method(),
            container = %name,
            "Running remote force-remove"
        );

        tokio::task::spawn_blocking(move || exec_remote(&config, &command))
            .await
            .map_err(|e| RuntimeError::Join(e.to_string()))?
    }

    fn describe(&self) -> String {
        format!(
            "remote ({}@{} via {}, {})",
            self.config.username,
            self.config.address(),
            self.config.auth.method(),
            self.binary
        )
    }
}

/// リモートシェル用にシングルクォートで囲む
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

fn exec_remote(config: &SshConfig, command: &str) -> Result<CommandOutput, RuntimeError> {
    let address = config.address();
    let socket_addr = address
        .to_socket_addrs()
        .map_err(|e| RuntimeError::Ssh(format!("{}: {}", address, e)))?
        .next()
        .ok_or_else(|| RuntimeError::Ssh(format!("{}: no address resolved", address)))?;

    let tcp = TcpStream::connect_timeout(&socket_addr, config.connect_timeout)
        .map_err(|e| RuntimeError::Ssh(format!("{}: {}", address, e)))?;

    let mut session = Session::new().map_err(ssh_error)?;
    session.set_tcp_stream(tcp);
    session.handshake().map_err(ssh_error)?;

    authenticate(&session, config)?;

    debug!(command = %command, "Executing remote command");
    let mut channel = session.channel_session().map_err(ssh_error)?;
    channel.exec(command).map_err(ssh_error)?;

    // 非ブロッキングにして stdout と stderr を交互に読む
    session.set_blocking(false);
    let drained = {
        let mut out_stream = channel.stream(0);
        let mut err_stream = channel.stderr();
        drain_streams(&mut out_stream, &mut err_stream, || channel.eof())
    };
    session.set_blocking(true);
    let (stdout, stderr) = drained.map_err(|e| RuntimeError::Ssh(e.to_string()))?;

    channel.wait_close().map_err(ssh_error)?;
    let exit_code = channel.exit_status().map_err(ssh_error)?;

    // 切断の失敗は結果に影響しない
    let _ = session.disconnect(None, "done", None);

    Ok(CommandOutput::from_bytes(&stdout, &stderr, exit_code))
}

/// 両ストリームが EOF になるか、チャネルが EOF で読めるデータが尽きるまで読む
fn drain_streams(
    stdout: &mut impl Read,
    stderr: &mut impl Read,
    eof: impl Fn() -> bool,
) -> io::Result<(Vec<u8>, Vec<u8>)> {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut out_done = false;
    let mut err_done = false;
    let mut buf = [0u8; 4096];

    while !(out_done && err_done) {
        let read_out = read_chunk(stdout, &mut buf, &mut out, &mut out_done)?;
        let read_err = read_chunk(stderr, &mut buf, &mut err, &mut err_done)?;

        if !read_out && !read_err {
            if eof() {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    Ok((out, err))
}

/// 読めた場合（EOF を含む）は true、WouldBlock なら false
fn read_chunk(
    reader: &mut impl Read,
    buf: &mut [u8],
    sink: &mut Vec<u8>,
    done: &mut bool,
) -> io::Result<bool> {
    if *done {
        return Ok(false);
    }
    match reader.read(buf) {
        Ok(0) => {
            *done = true;
            Ok(true)
        }
        Ok(n) => {
            sink.extend_from_slice(&buf[..n]);
            Ok(true)
        }
        Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::Interrupted) => Ok(false),
        Err(e) => Err(e),
    }
}

fn authenticate(session: &Session, config: &SshConfig) -> Result<(), RuntimeError> {
    let result = match &config.auth {
        SshAuth::Password(password) => session.userauth_password(&config.username, password),
        SshAuth::PrivateKey(path) => {
            session.userauth_pubkey_file(&config.username, None, path, None)
        }
    };
    result.map_err(|e| auth_error(config, &e))?;

    if !session.authenticated() {
        return Err(RuntimeError::Authentication(format!(
            "{} authentication rejected for {}",
            config.auth.method(),
            config.username
        )));
    }

    Ok(())
}

/// libssh2 の認証エラーを認証失敗として扱う
fn auth_error(config: &SshConfig, err: &ssh2::Error) -> RuntimeError {
    RuntimeError::Authentication(format!(
        "{} authentication failed for {}: {}",
        config.auth.method(),
        config.username,
        err.message()
    ))
}

fn ssh_error(err: ssh2::Error) -> RuntimeError {
    RuntimeError::Ssh(err.message().to_string())
}
