// Copyright 2025 Taglog Developers
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

//! Shared vocabulary of event tags.
//!
//! Tags are plain strings categorizing the event a record describes; the
//! facade never validates them, so any string works as a tag. These
//! constants exist so calling code agrees on the common ones.

pub const HTTP_REQUEST_IN: &str = "_tag_http_request_in";
pub const HTTP_REQUEST_OUT: &str = "_tag_http_request_out";

pub const RPC_REQUEST_IN: &str = "_tag_rpc_request_in";
pub const RPC_REQUEST_OUT: &str = "_tag_rpc_request_out";

pub const REDIS_SUCCESS: &str = "_tag_redis_success";
pub const REDIS_FAILED: &str = "_tag_redis_failed";

pub const MYSQL_SUCCESS: &str = "_tag_mysql_success";
pub const MYSQL_FAILED: &str = "_tag_mysql_failed";

pub const MQ_PRODUCE_SUCCESS: &str = "_tag_mq_produce_success";
pub const MQ_PRODUCE_FAILED: &str = "_tag_mq_produce_failed";
pub const MQ_CONSUME_SUCCESS: &str = "_tag_mq_consume_success";
pub const MQ_CONSUME_FAILED: &str = "_tag_mq_consume_failed";
