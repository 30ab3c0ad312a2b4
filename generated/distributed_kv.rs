// -- KV --

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoKvReq {
    #[prost(string, tag = "1")]
    pub key: ::prost::alloc::string::String,
    /// Ignored by Get and Del.
    #[prost(string, tag = "2")]
    pub value: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoKvResult {
    #[prost(oneof = "proto_kv_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_kv_result::Result>,
}
/// Nested message and enum types in `ProtoKvResult`.
pub mod proto_kv_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoKvSuccess),
        #[prost(message, tag = "2")]
        Err(super::ProtoKvError),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoKvSuccess {
    #[prost(string, tag = "1")]
    pub key: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub value: ::prost::alloc::string::String,
    /// False when Get/Del targeted an absent key.
    #[prost(bool, tag = "3")]
    pub found: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoKvError {
    #[prost(oneof = "proto_kv_error::Err", tags = "1, 2, 3, 4, 5, 6")]
    pub err: ::core::option::Option<proto_kv_error::Err>,
}
/// Nested message and enum types in `ProtoKvError`.
pub mod proto_kv_error {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Err {
        #[prost(message, tag = "1")]
        KeyBusy(super::ProtoKeyBusy),
        #[prost(message, tag = "2")]
        NoWorkers(super::ProtoNoWorkers),
        #[prost(message, tag = "3")]
        WorkerUnavailable(super::ProtoWorkerUnavailable),
        #[prost(message, tag = "4")]
        StorageFault(super::ProtoStorageFault),
        #[prost(message, tag = "5")]
        ReplicationFailed(super::ProtoReplicationFailed),
        #[prost(message, tag = "6")]
        MalformedReply(super::ProtoMalformedReply),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoKeyBusy {
    #[prost(string, tag = "1")]
    pub key: ::prost::alloc::string::String,
}
/// Empty
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoNoWorkers {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoWorkerUnavailable {
    #[prost(message, optional, tag = "1")]
    pub worker: ::core::option::Option<ProtoWorkerEndpoint>,
    #[prost(string, tag = "2")]
    pub reason: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoStorageFault {
    #[prost(string, tag = "1")]
    pub message: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoReplicationFailed {
    #[prost(message, repeated, tag = "1")]
    pub failed_peers: ::prost::alloc::vec::Vec<ProtoWorkerEndpoint>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoMalformedReply {
    #[prost(string, tag = "1")]
    pub message: ::prost::alloc::string::String,
}
// -- Membership --

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoWorkerEndpoint {
    #[prost(string, tag = "1")]
    pub address: ::prost::alloc::string::String,
    #[prost(uint32, tag = "2")]
    pub port: u32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoRegisterReq {
    #[prost(string, tag = "1")]
    pub message: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub address: ::prost::alloc::string::String,
    #[prost(uint32, tag = "3")]
    pub port: u32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoDeregisterReq {
    #[prost(uint32, tag = "1")]
    pub port: u32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoMembershipReply {
    #[prost(string, tag = "1")]
    pub message: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub membership: ::core::option::Option<ProtoMembership>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoMembership {
    #[prost(uint64, tag = "1")]
    pub version: u64,
    #[prost(message, repeated, tag = "2")]
    pub members: ::prost::alloc::vec::Vec<ProtoWorkerEndpoint>,
}
/// Empty
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoMembershipAck {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoValue {
    #[prost(string, tag = "1")]
    pub value: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoSpreadReq {
    #[prost(bool, tag = "1")]
    pub rollback: bool,
    #[prost(enumeration = "ProtoMethod", tag = "2")]
    pub method: i32,
    #[prost(string, tag = "3")]
    pub key: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub value: ::prost::alloc::string::String,
    /// Coordinator's value before the mutation. Absent means the key did not exist.
    #[prost(message, optional, tag = "5")]
    pub prior: ::core::option::Option<ProtoValue>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoSpreadResult {
    #[prost(oneof = "proto_spread_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_spread_result::Result>,
}
/// Nested message and enum types in `ProtoSpreadResult`.
pub mod proto_spread_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoSpreadAck),
        #[prost(message, tag = "2")]
        Err(super::ProtoServerFault),
    }
}
/// Empty
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoSpreadAck {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoServerFault {
    #[prost(string, tag = "1")]
    pub message: ::prost::alloc::string::String,
}
// -- Replication --

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProtoMethod {
    Unspecified = 0,
    Put = 1,
    Del = 2,
}
#[doc = r" Generated client implementations."]
pub mod kv_methods_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = " Client -> master, and master -> worker. The master forwards every call to one worker."]
    pub struct KvMethodsClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl KvMethodsClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> KvMethodsClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        pub async fn get(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoKvReq>,
        ) -> Result<tonic::Response<super::ProtoKvResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/distributed_kv.KvMethods/Get");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn put(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoKvReq>,
        ) -> Result<tonic::Response<super::ProtoKvResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/distributed_kv.KvMethods/Put");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn del(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoKvReq>,
        ) -> Result<tonic::Response<super::ProtoKvResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/distributed_kv.KvMethods/Del");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for KvMethodsClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for KvMethodsClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "KvMethodsClient {{ ... }}")
        }
    }
}
#[doc = r" Generated client implementations."]
pub mod worker_registry_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = " Worker -> master."]
    pub struct WorkerRegistryClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl WorkerRegistryClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> WorkerRegistryClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        pub async fn register(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoRegisterReq>,
        ) -> Result<tonic::Response<super::ProtoMembershipReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path =
                http::uri::PathAndQuery::from_static("/distributed_kv.WorkerRegistry/Register");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn deregister(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoDeregisterReq>,
        ) -> Result<tonic::Response<super::ProtoMembershipReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path =
                http::uri::PathAndQuery::from_static("/distributed_kv.WorkerRegistry/Deregister");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for WorkerRegistryClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for WorkerRegistryClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "WorkerRegistryClient {{ ... }}")
        }
    }
}
#[doc = r" Generated client implementations."]
pub mod worker_spreader_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = " Worker -> worker."]
    pub struct WorkerSpreaderClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl WorkerSpreaderClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> WorkerSpreaderClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        pub async fn spread(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoSpreadReq>,
        ) -> Result<tonic::Response<super::ProtoSpreadResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path =
                http::uri::PathAndQuery::from_static("/distributed_kv.WorkerSpreader/Spread");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for WorkerSpreaderClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for WorkerSpreaderClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "WorkerSpreaderClient {{ ... }}")
        }
    }
}
#[doc = r" Generated client implementations."]
pub mod worker_membership_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = " Master -> worker."]
    pub struct WorkerMembershipClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl WorkerMembershipClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> WorkerMembershipClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        pub async fn sync_membership(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoMembership>,
        ) -> Result<tonic::Response<super::ProtoMembershipAck>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/distributed_kv.WorkerMembership/SyncMembership",
            );
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for WorkerMembershipClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for WorkerMembershipClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "WorkerMembershipClient {{ ... }}")
        }
    }
}
#[doc = r" Generated server implementations."]
pub mod kv_methods_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with KvMethodsServer."]
    #[async_trait]
    pub trait KvMethods: Send + Sync + 'static {
        async fn get(
            &self,
            request: tonic::Request<super::ProtoKvReq>,
        ) -> Result<tonic::Response<super::ProtoKvResult>, tonic::Status>;
        async fn put(
            &self,
            request: tonic::Request<super::ProtoKvReq>,
        ) -> Result<tonic::Response<super::ProtoKvResult>, tonic::Status>;
        async fn del(
            &self,
            request: tonic::Request<super::ProtoKvReq>,
        ) -> Result<tonic::Response<super::ProtoKvResult>, tonic::Status>;
    }
    #[doc = " Client -> master, and master -> worker. The master forwards every call to one worker."]
    #[derive(Debug)]
    pub struct KvMethodsServer<T: KvMethods> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: KvMethods> KvMethodsServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for KvMethodsServer<T>
    where
        T: KvMethods,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/distributed_kv.KvMethods/Get" => {
                    #[allow(non_camel_case_types)]
                    struct GetSvc<T: KvMethods>(pub Arc<T>);
                    impl<T: KvMethods> tonic::server::UnaryService<super::ProtoKvReq> for GetSvc<T> {
                        type Response = super::ProtoKvResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoKvReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/distributed_kv.KvMethods/Put" => {
                    #[allow(non_camel_case_types)]
                    struct PutSvc<T: KvMethods>(pub Arc<T>);
                    impl<T: KvMethods> tonic::server::UnaryService<super::ProtoKvReq> for PutSvc<T> {
                        type Response = super::ProtoKvResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoKvReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).put(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = PutSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/distributed_kv.KvMethods/Del" => {
                    #[allow(non_camel_case_types)]
                    struct DelSvc<T: KvMethods>(pub Arc<T>);
                    impl<T: KvMethods> tonic::server::UnaryService<super::ProtoKvReq> for DelSvc<T> {
                        type Response = super::ProtoKvResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoKvReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).del(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = DelSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: KvMethods> Clone for KvMethodsServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: KvMethods> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: KvMethods> tonic::transport::NamedService for KvMethodsServer<T> {
        const NAME: &'static str = "distributed_kv.KvMethods";
    }
}
#[doc = r" Generated server implementations."]
pub mod worker_registry_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with WorkerRegistryServer."]
    #[async_trait]
    pub trait WorkerRegistry: Send + Sync + 'static {
        async fn register(
            &self,
            request: tonic::Request<super::ProtoRegisterReq>,
        ) -> Result<tonic::Response<super::ProtoMembershipReply>, tonic::Status>;
        async fn deregister(
            &self,
            request: tonic::Request<super::ProtoDeregisterReq>,
        ) -> Result<tonic::Response<super::ProtoMembershipReply>, tonic::Status>;
    }
    #[doc = " Worker -> master."]
    #[derive(Debug)]
    pub struct WorkerRegistryServer<T: WorkerRegistry> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: WorkerRegistry> WorkerRegistryServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for WorkerRegistryServer<T>
    where
        T: WorkerRegistry,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/distributed_kv.WorkerRegistry/Register" => {
                    #[allow(non_camel_case_types)]
                    struct RegisterSvc<T: WorkerRegistry>(pub Arc<T>);
                    impl<T: WorkerRegistry> tonic::server::UnaryService<super::ProtoRegisterReq> for RegisterSvc<T> {
                        type Response = super::ProtoMembershipReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoRegisterReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).register(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = RegisterSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/distributed_kv.WorkerRegistry/Deregister" => {
                    #[allow(non_camel_case_types)]
                    struct DeregisterSvc<T: WorkerRegistry>(pub Arc<T>);
                    impl<T: WorkerRegistry> tonic::server::UnaryService<super::ProtoDeregisterReq>
                        for DeregisterSvc<T>
                    {
                        type Response = super::ProtoMembershipReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoDeregisterReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).deregister(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = DeregisterSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: WorkerRegistry> Clone for WorkerRegistryServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: WorkerRegistry> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: WorkerRegistry> tonic::transport::NamedService for WorkerRegistryServer<T> {
        const NAME: &'static str = "distributed_kv.WorkerRegistry";
    }
}
#[doc = r" Generated server implementations."]
pub mod worker_spreader_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with WorkerSpreaderServer."]
    #[async_trait]
    pub trait WorkerSpreader: Send + Sync + 'static {
        async fn spread(
            &self,
            request: tonic::Request<super::ProtoSpreadReq>,
        ) -> Result<tonic::Response<super::ProtoSpreadResult>, tonic::Status>;
    }
    #[doc = " Worker -> worker."]
    #[derive(Debug)]
    pub struct WorkerSpreaderServer<T: WorkerSpreader> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: WorkerSpreader> WorkerSpreaderServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for WorkerSpreaderServer<T>
    where
        T: WorkerSpreader,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/distributed_kv.WorkerSpreader/Spread" => {
                    #[allow(non_camel_case_types)]
                    struct SpreadSvc<T: WorkerSpreader>(pub Arc<T>);
                    impl<T: WorkerSpreader> tonic::server::UnaryService<super::ProtoSpreadReq> for SpreadSvc<T> {
                        type Response = super::ProtoSpreadResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoSpreadReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).spread(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = SpreadSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: WorkerSpreader> Clone for WorkerSpreaderServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: WorkerSpreader> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: WorkerSpreader> tonic::transport::NamedService for WorkerSpreaderServer<T> {
        const NAME: &'static str = "distributed_kv.WorkerSpreader";
    }
}
#[doc = r" Generated server implementations."]
pub mod worker_membership_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with WorkerMembershipServer."]
    #[async_trait]
    pub trait WorkerMembership: Send + Sync + 'static {
        async fn sync_membership(
            &self,
            request: tonic::Request<super::ProtoMembership>,
        ) -> Result<tonic::Response<super::ProtoMembershipAck>, tonic::Status>;
    }
    #[doc = " Master -> worker."]
    #[derive(Debug)]
    pub struct WorkerMembershipServer<T: WorkerMembership> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: WorkerMembership> WorkerMembershipServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for WorkerMembershipServer<T>
    where
        T: WorkerMembership,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/distributed_kv.WorkerMembership/SyncMembership" => {
                    #[allow(non_camel_case_types)]
                    struct SyncMembershipSvc<T: WorkerMembership>(pub Arc<T>);
                    impl<T: WorkerMembership> tonic::server::UnaryService<super::ProtoMembership>
                        for SyncMembershipSvc<T>
                    {
                        type Response = super::ProtoMembershipAck;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoMembership>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).sync_membership(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = SyncMembershipSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: WorkerMembership> Clone for WorkerMembershipServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: WorkerMembership> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: WorkerMembership> tonic::transport::NamedService for WorkerMembershipServer<T> {
        const NAME: &'static str = "distributed_kv.WorkerMembership";
    }
}
